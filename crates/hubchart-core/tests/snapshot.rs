// File: crates/hubchart-core/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders a deterministic line chart (labels off) to PNG bytes.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for an exact match.
// - Else, logs a note and returns without failing.

mod support;

use hubchart_core::{render_job, ChartVariant};
use support::{ctx, hourly, job};

fn render_bytes() -> Vec<u8> {
    let dir = tempfile::tempdir().expect("tempdir");
    hourly(dir.path(), "t.csv", "Temp", &["0", "1", "0", "1.5", "1"]);
    let mut j = job(ChartVariant::Line, dir.path());
    j.p_dict.insert("line1Source", "t.csv");
    j.p_dict.insert("line1Fill", true);
    j.p_dict.insert("showyAxisGrid", true);
    let out = render_job(&j, &mut ctx()).expect("render").expect("not skipped");
    out.figure.render_to_png_bytes().expect("png bytes")
}

#[test]
fn golden_line_chart() {
    let bytes = render_bytes();
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("line_chart.png");

    let update = std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        let got_img = image::load_from_memory(&bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}
