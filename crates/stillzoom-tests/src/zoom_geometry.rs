//! Crop-sequence scenarios: the plan's factors driven through the crop
//! math, checked against known rectangles.

use stillzoom_core::{CropRect, FrameRate, Resolution, Vec2, ZoomPlan};

// ── Helpers ────────────────────────────────────────────────────

const SOURCE: Resolution = Resolution::new(1920, 1080);

fn scenario_plan(zoom_out: bool) -> ZoomPlan {
    // 1920x1080 source, COE at the image center, factor 4.0, 2s at 10fps.
    ZoomPlan::new(4.0, 2.0, FrameRate::new(10, 1), zoom_out).unwrap()
}

fn crop_sequence(plan: &ZoomPlan) -> Vec<CropRect> {
    let coe = Vec2::new(960.0, 540.0);
    let complement = SOURCE.as_vec2() - coe;
    plan.states()
        .map(|(_, state)| CropRect::around(coe, complement, state.factor()))
        .collect()
}

fn edges_close(a: CropRect, b: CropRect, tolerance: i64) -> bool {
    (a.left - b.left).abs() <= tolerance
        && (a.right - b.right).abs() <= tolerance
        && (a.top - b.top).abs() <= tolerance
        && (a.bottom - b.bottom).abs() <= tolerance
}

// ── Zoom-in scenario ───────────────────────────────────────────

#[test]
fn twenty_frames_for_two_seconds_at_ten_fps() {
    let plan = scenario_plan(false);
    assert_eq!(plan.total_frames(), 20);
    assert_eq!(crop_sequence(&plan).len(), 20);
}

#[test]
fn first_frame_covers_the_full_image() {
    let rects = crop_sequence(&scenario_plan(false));
    assert_eq!(rects[0], CropRect::full(SOURCE));
}

#[test]
fn final_frame_is_the_tightest_crop() {
    // The last frame renders at zoom_base^18 ≈ 2.688 (the factor trails
    // the index by one), giving a ~714x402 crop centered on the COE.
    let rects = crop_sequence(&scenario_plan(false));
    let last = rects[19];
    assert!(edges_close(last, CropRect::new(603, 339, 1317, 741), 1));
    assert!(rects.iter().all(|r| r.width() >= last.width()));
    assert!(rects.iter().all(|r| r.height() >= last.height()));
}

#[test]
fn every_crop_stays_inside_the_source() {
    for rect in crop_sequence(&scenario_plan(true)) {
        assert!(rect.fits_within(SOURCE), "{rect} escapes the source image");
    }
}

#[test]
fn crops_shrink_monotonically_after_the_seed_frame() {
    let rects = crop_sequence(&scenario_plan(false));
    for pair in rects[1..].windows(2) {
        assert!(pair[1].width() <= pair[0].width() + 1);
        assert!(pair[1].height() <= pair[0].height() + 1);
    }
}

// ── Zoom-out scenario ──────────────────────────────────────────

#[test]
fn zoom_out_emits_forty_frames() {
    let plan = scenario_plan(true);
    assert_eq!(plan.output_frames(), 40);
    assert_eq!(crop_sequence(&plan).len(), 40);
}

#[test]
fn apex_frames_match_exactly() {
    let rects = crop_sequence(&scenario_plan(true));
    assert_eq!(rects[19], rects[20]);
}

#[test]
fn zoom_out_returns_to_the_full_image() {
    let rects = crop_sequence(&scenario_plan(true));
    assert_eq!(rects[39], rects[0]);
    assert_eq!(rects[39], CropRect::full(SOURCE));
}

#[test]
fn mirrored_half_reverses_the_forward_half() {
    let rects = crop_sequence(&scenario_plan(true));
    for i in 0..20 {
        assert_eq!(rects[i], rects[39 - i]);
    }
}
