use std::{
    io::{Cursor, Write},
    path::PathBuf,
    process::{Command, Output, Stdio},
};

use image::{ImageFormat, Rgba, RgbaImage};

const BIN: &str = env!("CARGO_BIN_EXE_sprite2c");

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sprite2c-{}-{name}", std::process::id()))
}

fn png(image: &RgbaImage) -> Vec<u8> {
    let mut data = Cursor::new(Vec::new());
    image.write_to(&mut data, ImageFormat::Png).unwrap();
    data.into_inner()
}

/// 16x16, top left 8x8 quadrant opaque white.
fn quadrant() -> RgbaImage {
    RgbaImage::from_fn(16, 16, |x, y| {
        if x < 8 && y < 8 { Rgba([255, 255, 255, 255]) } else { Rgba([0, 0, 0, 0]) }
    })
}

fn run(args: &[&str], stdin: &[u8]) -> Output {
    run_with_log(args, stdin, "error")
}

fn run_with_log(args: &[&str], stdin: &[u8], filter: &str) -> Output {
    let mut child = Command::new(BIN)
        .args(args)
        .env("RUST_LOG", filter)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // Failures can exit before stdin is consumed; the pipe may already be closed.
    let _ = child.stdin.take().unwrap().write_all(stdin);
    child.wait_with_output().unwrap()
}

fn write_json(name: &str, json: &str) -> PathBuf {
    let path = temp_path(name);
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn single_image_from_stdin() {
    let output = run(&["--order", "row-major", "--name", "logo"], &png(&quadrant()));
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.starts_with("const uint8_t logoWidth = 16;\nconst uint8_t logoHeight = 16;\n"));
    assert!(text.contains("const uint8_t PROGMEM logo[32] = {\n"));
    let row = "0xff,0x00,".repeat(8) + &"0x00,".repeat(15) + "0x00\n};\n";
    assert!(text.ends_with(&format!("  {row}")), "{text}");
    assert!(!text.contains("#ifndef"));
}

#[test]
fn sheet_to_file_with_guard() {
    let image = temp_path("sheet.png");
    std::fs::write(&image, png(&quadrant())).unwrap();
    let json = write_json(
        "sheet.json",
        r#"{ "frames": [
            { "filename": "a.png", "frame": { "x": 0, "y": 0, "w": 8, "h": 8 } },
            { "filename": "b.png", "frame": { "x": 8, "y": 0, "w": 8, "h": 8 } },
            { "filename": "c.png", "frame": { "x": 0, "y": 8, "w": 8, "h": 8 } }
        ], "meta": { "image": "sheet.png" } }"#,
    );
    let out = temp_path("sheet.h");
    let output = run(
        &[
            "--in", image.to_str().unwrap(),
            "--out", out.to_str().unwrap(),
            "--json", json.to_str().unwrap(),
            "--name", "walk",
            "--header-guard",
            "--no-progmem",
        ],
        b"",
    );
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("#ifndef WALK_H\n#define WALK_H\n\n"));
    assert!(text.contains("const uint8_t walkFrameCount = 3;\n"));
    assert!(text.contains("const uint8_t walkFrameWidth = 8;\n"));
    assert!(text.contains("const uint8_t walkFrameHeight = 8;\n"));
    assert!(text.contains("const uint8_t walkFrames[][8] = {\n"));
    assert!(text.contains("  /* Frame number 1 (b.png)\n"));
    assert!(text.contains(&format!("  {{{}}},\n", ["0xff"; 8].join(","))));
    assert!(text.ends_with("\n};\n\n#endif\n"));

    for path in [image, json, out] {
        std::fs::remove_file(path).unwrap();
    }
}

#[test]
fn empty_frame_list_fails() {
    let json = write_json("empty.json", r#"{ "frames": [], "meta": { "image": "x.png" } }"#);
    let output = run(&["--json", json.to_str().unwrap()], &png(&quadrant()));
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no frames"));
    std::fs::remove_file(json).unwrap();
}

#[test]
fn malformed_json_fails() {
    let json = write_json("broken.json", r#"{ "frames": [ { "frame": "#);
    let output = run(&["--json", json.to_str().unwrap()], &png(&quadrant()));
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    std::fs::remove_file(json).unwrap();
}

#[test]
fn unaligned_image_fails() {
    let output = run(&[], &png(&RgbaImage::new(12, 8)));
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("12x8"));
}

#[test]
fn failure_is_reported_with_logging_off() {
    let output = run_with_log(&[], &png(&RgbaImage::new(12, 8)), "off");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("12x8"));
}

#[test]
fn transparent_colour_is_background() {
    let hidden = png(&RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 0])));
    let output = run(&[], &hidden);
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.ends_with(&format!("  {}\n}};\n", ["0x00"; 8].join(","))), "{text}");

    let output = run(&["--threshold", "straight"], &hidden);
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.ends_with(&format!("  {}\n}};\n", ["0xff"; 8].join(","))), "{text}");
}

#[test]
fn out_of_bounds_frame_fails() {
    let json = write_json(
        "oob.json",
        r#"{ "frames": [ { "filename": "a", "frame": { "x": 8, "y": 8, "w": 16, "h": 8 } } ] }"#,
    );
    let output = run(&["--json", json.to_str().unwrap()], &png(&quadrant()));
    assert!(!output.status.success());
    std::fs::remove_file(json).unwrap();
}

#[test]
fn undecodable_image_fails() {
    let output = run(&[], b"GIF89a but not really");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_input_fails() {
    let missing = temp_path("missing.png");
    let output = run(&["--in", missing.to_str().unwrap()], b"");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.png"));
}

#[test]
fn invalid_name_fails() {
    let output = run(&["--name", "my sprite"], &png(&quadrant()));
    assert!(!output.status.success());
}

#[test]
fn preview_is_written() {
    let preview = temp_path("preview.png");
    let output = run(&["--preview", preview.to_str().unwrap()], &png(&quadrant()));
    assert!(output.status.success());
    let image = image::open(&preview).unwrap().into_luma8();
    assert_eq!(image.dimensions(), (16, 16));
    assert_eq!(image.get_pixel(0, 0).0, [0xFF]);
    assert_eq!(image.get_pixel(15, 15).0, [0x00]);
    std::fs::remove_file(preview).unwrap();
}
