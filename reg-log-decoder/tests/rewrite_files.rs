// End-to-end rewriting through real files on disk
use reg_log_decoder::{Decoder, DecoderConfig, DecoderError, OrphanPolicy};
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const SMB_HEADER: &str = r#"
#ifndef __SMB2_CHARGER_REG_H
#define __SMB2_CHARGER_REG_H

#include <linux/bitops.h>

#define CHGR_BASE 0x1000

#define APSD_STATUS_REG 0x100d
#define DCP_CHARGER_BIT BIT(3)
#define APSD_RESULT_STATUS_MASK GENMASK(7, 4)

#define BATTERY_CHARGER_STATUS_1_REG 4102
#define BVR_INITIAL_RAMP_BIT BIT(7)
#define CC_SOFT_TERMINATE_BIT BIT(6)
#define BATTERY_CHARGER_STATUS_MASK GENMASK(2, 0)

#endif
"#;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_rewrite_file_end_to_end() {
    init_logging();
    let header = write_temp(SMB_HEADER);
    let log = write_temp(
        "[ 7292.713722] qpnp-smb2: smblib_read(addr = 0x100d, val = 0x78)\n\
         [ 7292.713800] qpnp-smb2: smblib_read(addr = 0x1006, val = 0xc3)\n\
         [ 7292.713900] qpnp-smb2: smblib_read(addr = 0x100d, val = 0x00)\n\
         [ 7292.714000] qpnp-smb2: smblib_write(addr = 0x2000, val = 0x01)\n\
         [ 7292.714100] unrelated line\n",
    );
    let out_dir = TempDir::new().unwrap();
    let out_path = out_dir.path().join("decoded.txt");

    let mut decoder = Decoder::new();
    decoder.load_header(header.path()).unwrap();
    assert_eq!(decoder.model().len(), 3);

    let stats = decoder.rewrite_file(log.path(), &out_path).unwrap();
    assert_eq!(stats.total_lines, 5);
    assert_eq!(stats.candidate_lines, 4);
    assert_eq!(stats.rewritten_lines, 3);
    assert_eq!(stats.unknown_addresses, 1);

    let output = fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = output.split('\n').collect();
    assert_eq!(
        lines,
        vec![
            "[ 7292.713722] qpnp-smb2: smblib_read(addr = APSD_STATUS_REG, val = DCP_CHARGER_BIT|APSD_RESULT_STATUS_MASK=0x7)",
            "[ 7292.713800] qpnp-smb2: smblib_read(addr = BATTERY_CHARGER_STATUS_1_REG, val = BVR_INITIAL_RAMP_BIT|CC_SOFT_TERMINATE_BIT|BATTERY_CHARGER_STATUS_MASK=0x3)",
            "[ 7292.713900] qpnp-smb2: smblib_read(addr = APSD_STATUS_REG, val = 0x00)",
            "[ 7292.714000] qpnp-smb2: smblib_write(addr = 0x2000, val = 0x01)",
            "[ 7292.714100] unrelated line",
        ]
    );
}

#[test]
fn test_hex_and_decimal_registers_agree() {
    let mut decoder = Decoder::new();
    decoder
        .load_header_str("#define HEX_REG 0x10\n#define DEC_REG 16\n")
        .unwrap();

    let model = decoder.model();
    assert_eq!(model.get("HEX_REG").unwrap().value, 16);
    assert_eq!(model.get("DEC_REG").unwrap().value, 16);

    // Both share an address; the first one in the header is used
    let (output, _) = decoder.rewrite_str("addr = 0x10, val = 0x1");
    assert_eq!(output, "addr = HEX_REG, val = 0x1");
}

#[test]
fn test_orphan_bit_in_header_file() {
    let header = write_temp("#define LONELY_BIT BIT(0)\n#define REG 0x1\n");

    let mut decoder = Decoder::new();
    let err = decoder.load_header(header.path()).unwrap_err();
    assert!(matches!(err, DecoderError::HeaderFormatError { line: 1, .. }));

    let config = DecoderConfig::new().with_orphan_policy(OrphanPolicy::Ignore);
    let mut lenient = Decoder::with_config(config).unwrap();
    lenient.load_header(header.path()).unwrap();
    assert_eq!(lenient.model().len(), 1);
}

#[test]
fn test_missing_log_file_is_io_error() {
    let out_dir = TempDir::new().unwrap();
    let decoder = Decoder::new();
    let err = decoder
        .rewrite_file(&out_dir.path().join("missing.log"), &out_dir.path().join("out.txt"))
        .unwrap_err();
    assert!(matches!(err, DecoderError::IoError(_)));
}

#[test]
fn test_unmatched_log_is_byte_identical() {
    let mut decoder = Decoder::new();
    decoder.load_header_str(SMB_HEADER).unwrap();

    let input = "addr = 0xffff, val = 0x78\nno literals here";
    let (output, stats) = decoder.rewrite_str(input);
    assert_eq!(output, input);
    assert_eq!(stats.rewritten_lines, 0);
}
