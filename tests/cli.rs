// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use assert_cmd::prelude::*;
use image::{GenericImageView, GrayImage, ImageBuffer};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const CROSS: &str = "P2\n# cross\n3 3\n9\n1 2 1 \n2 9 2 \n1 2 1 \n";

fn write_input(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn pnmcarve() -> Command {
    Command::cargo_bin("pnmcarve").unwrap()
}

#[test]
fn carves_a_plain_graymap_next_to_the_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "cross.pgm", CROSS);

    pnmcarve()
        .arg(&input)
        .arg("1")
        .arg("0")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved:"))
        .stdout(predicate::str::contains("cross_processed_1_0.pgm"));

    let carved = fs::read_to_string(dir.path().join("cross_processed_1_0.pgm")).unwrap();
    assert_eq!(carved, "P2\n# cross\n2 3\n9\n2 1 \n9 2 \n2 1 \n");
}

#[test]
fn removes_rows_and_honours_an_explicit_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "cross.pgm", CROSS);
    let output = dir.path().join("short.pgm");

    pnmcarve()
        .arg(&input)
        .arg("0")
        .arg("1")
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "P2\n# cross\n3 2\n9\n2 9 2 \n1 2 1 \n"
    );
}

#[test]
fn zero_seams_reproduce_the_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "cross.pgm", CROSS);

    pnmcarve().arg(&input).arg("0").arg("0").assert().success();

    let copy = fs::read_to_string(dir.path().join("cross_processed_0_0.pgm")).unwrap();
    assert_eq!(copy, CROSS);
}

#[test]
fn carves_a_plain_pixmap() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        "flat.ppm",
        "P3\n2 2\n255\n5 5 5 5 5 5 \n5 5 5 5 5 5 \n",
    );

    pnmcarve().arg(&input).arg("1").arg("1").assert().success();

    let carved = fs::read_to_string(dir.path().join("flat_processed_1_1.ppm")).unwrap();
    assert_eq!(carved, "P3\n1 1\n255\n5 5 5 \n");
}

#[test]
fn writes_the_energy_map_on_request() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "cross.pgm", CROSS);
    let energy = dir.path().join("energy.pgm");

    pnmcarve()
        .arg(&input)
        .arg("0")
        .arg("0")
        .arg("--energy")
        .arg(&energy)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&energy).unwrap(),
        "P2\n3 3\n255\n18 82 18 \n82 255 82 \n18 82 18 \n"
    );
}

#[test]
fn refuses_more_seams_than_the_image_has() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "cross.pgm", CROSS);

    pnmcarve()
        .arg(&input)
        .arg("3")
        .arg("0")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "requested seams (3,0) exceed dimensions (3,3)",
        ));
    assert!(!dir.path().join("cross_processed_3_0.pgm").exists());
}

#[test]
fn reports_unreadable_input() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.pgm");

    pnmcarve()
        .arg(&missing)
        .arg("1")
        .arg("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Fatal:"));
}

#[test]
fn reports_malformed_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "short.pgm", "P2\n2 2\n255\n1 2 3\n");

    pnmcarve()
        .arg(&input)
        .arg("1")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("insufficient pixel data"));
}

#[test]
fn rejects_a_non_numeric_count() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "cross.pgm", CROSS);

    pnmcarve().arg(&input).arg("many").arg("0").assert().failure();
}

#[test]
fn carves_other_formats_through_the_image_crate() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ramp.png");
    let buf: GrayImage = ImageBuffer::from_fn(5, 4, |x, _| image::Luma([(x * 40) as u8]));
    buf.save(&input).unwrap();

    pnmcarve().arg(&input).arg("2").arg("1").assert().success();

    let output = Path::new(dir.path()).join("ramp_processed_2_1.png");
    let carved = image::open(&output).unwrap();
    assert_eq!(carved.dimensions(), (3, 3));
}
