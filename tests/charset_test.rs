//! Integration tests for reading HTML files in different encodings

use static_site_tools::Error;
use static_site_tools::charset::read_html;
use std::fs;

#[test]
fn test_read_utf8_file() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let path = dir.path().join("utf8.html");
    fs::write(&path, "<p>\u{4e2d}\u{6587}</p>").expect("write failed");

    assert_eq!(read_html(&path).expect("read failed"), "<p>\u{4e2d}\u{6587}</p>");
}

#[test]
fn test_read_utf8_file_with_bom_strips_it() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let path = dir.path().join("bom.html");
    fs::write(&path, b"\xEF\xBB\xBF<p>x</p>").expect("write failed");

    assert_eq!(read_html(&path).expect("read failed"), "<p>x</p>");
}

#[test]
fn test_read_utf16be_file() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let path = dir.path().join("utf16.html");
    fs::write(&path, b"\xFE\xFF\0<\0p\0>").expect("write failed");

    assert_eq!(read_html(&path).expect("read failed"), "<p>");
}

#[test]
fn test_read_shift_jis_file_from_http_equiv() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let path = dir.path().join("sjis.html");
    let mut bytes = b"<meta http-equiv=\"Content-Type\" content=\"text/html; charset=Shift_JIS\"><p>".to_vec();
    // "日本" in Shift_JIS
    bytes.extend_from_slice(b"\x93\xfa\x96\x7b");
    bytes.extend_from_slice(b"</p>");
    fs::write(&path, bytes).expect("write failed");

    let text = read_html(&path).expect("read failed");
    assert!(text.ends_with("<p>\u{65e5}\u{672c}</p>"), "text was {text}");
}

#[test]
fn test_read_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let path = dir.path().join("absent.html");

    match read_html(&path) {
        Err(Error::Read { path: reported, source }) => {
            assert_eq!(reported, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected read error, got {other:?}"),
    }
}

#[test]
fn test_read_file_with_unsupported_charset() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let path = dir.path().join("odd.html");
    fs::write(&path, "<meta charset=\"x-made-up\"><p>x</p>").expect("write failed");

    assert!(matches!(
        read_html(&path),
        Err(Error::UnsupportedCharset(ref cs)) if cs == "X-MADE-UP"
    ));
}
