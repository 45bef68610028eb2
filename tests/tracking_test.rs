use std::time::Duration;

use meanshift_track::tracker::HISTOGRAM_MAX;
use meanshift_track::{
    Frame, Histogram, Hsv, HsvImage, Mask, MeanShiftTracker, Outline, ProbabilityMap, Rect,
    RenderSink, SelectionBuilder, TerminationCriteria, TickOutcome, TrackState, TrackerConfig,
    TrackerPipeline, TrackingError, TrackingSession, back_project, draw_outline, mean_shift,
    threshold, to_hsv,
};
use ndarray::Array2;

const NEUTRAL: [u8; 4] = [128, 128, 128, 255];
const TARGET: [u8; 4] = [60, 90, 150, 255];

fn synthetic_frame(square_at: (i32, i32), ms: u64) -> Frame {
    let mut frame = Frame::filled(100, 100, NEUTRAL, Duration::from_millis(ms)).unwrap();
    frame.fill_rect(&Rect::new(square_at.0, square_at.1, 20, 20), TARGET);
    frame
}

#[test]
fn test_square_moves_and_window_follows() {
    let criteria = TerminationCriteria::default();
    let mut session = TrackingSession::with_default_config();

    session
        .select(&synthetic_frame((40, 40), 0), Rect::new(40, 40, 20, 20))
        .unwrap();
    let outcome = session.track(&synthetic_frame((50, 50), 33)).unwrap();

    assert!(outcome.iterations <= criteria.max_iterations);
    assert!((outcome.window.x - 50).abs() as f64 <= criteria.min_shift);
    assert!((outcome.window.y - 50).abs() as f64 <= criteria.min_shift);
    assert_eq!((outcome.window.width, outcome.window.height), (20, 20));
}

#[test]
fn test_roi_partially_outside_is_invalid() {
    let mut session = TrackingSession::with_default_config();
    let err = session
        .select(&synthetic_frame((40, 40), 0), Rect::new(-5, -5, 10, 10))
        .unwrap_err();
    assert_eq!(
        err,
        TrackingError::InvalidRoi {
            roi: Rect::new(-5, -5, 10, 10),
            frame_width: 100,
            frame_height: 100,
        }
    );
    assert_eq!(session.state(), TrackState::Idle);
}

#[test]
fn test_zero_area_roi_is_invalid() {
    let mut session = TrackingSession::with_default_config();
    let err = session
        .select(&synthetic_frame((40, 40), 0), Rect::new(10, 10, 0, 0))
        .unwrap_err();
    assert!(matches!(err, TrackingError::InvalidRoi { .. }));
}

#[test]
fn test_drag_beyond_frame_is_rejected_without_panicking() {
    let frame = synthetic_frame((40, 40), 0);
    let roi = SelectionBuilder::new()
        .start(50.0, 0.0)
        .end(1.0e12, 10.0)
        .build();
    assert_eq!(roi, Rect::new(50, 0, i32::MAX - 50, 10));

    let mut session = TrackingSession::with_default_config();
    assert!(matches!(
        session.select(&frame, roi),
        Err(TrackingError::InvalidRoi { .. })
    ));
    assert_eq!(session.state(), TrackState::Idle);
}

#[test]
fn test_hsv_bounds_for_all_gray_levels_and_primaries() {
    for v in 0..=255u8 {
        for rgb in [(v, 0, 0), (0, v, 0), (0, 0, v), (v, v, 255 - v), (255 - v, v, v)] {
            let hsv = Hsv::from_rgb(rgb.0, rgb.1, rgb.2);
            assert!(hsv.h < 180, "{rgb:?} -> {hsv:?}");
        }
    }
}

#[test]
fn test_histogram_from_frame_region() {
    let frame = synthetic_frame((40, 40), 0);
    let hsv = to_hsv(frame.region(&Rect::new(30, 30, 40, 40)).unwrap());
    let mask = threshold(&hsv, 30, 180);

    // Only the 20x20 target survives the mask, the neutral gray has no saturation.
    assert_eq!(mask.count(), 400);

    let hist = Histogram::build(&hsv, &mask, 180).unwrap();
    assert_eq!(hist.peak(), HISTOGRAM_MAX);
    assert!(hist.bins().iter().all(|&b| b >= 0.0));
    assert_eq!(hist.bins().iter().filter(|&&b| b > 0.0).count(), 1);
}

#[test]
fn test_all_false_mask_is_degenerate() {
    let hsv = HsvImage::from_array(Array2::from_elem((4, 4), Hsv { h: 10, s: 90, v: 90 }));
    let mask = Mask::from_array(Array2::from_elem((4, 4), false));
    assert_eq!(
        Histogram::build(&hsv, &mask, 180),
        Err(TrackingError::DegenerateRegion)
    );
}

#[test]
fn test_static_map_is_idempotent() {
    let frame = synthetic_frame((40, 40), 0);
    let hsv = to_hsv(frame.pixels());
    let region = to_hsv(frame.region(&Rect::new(40, 40, 20, 20)).unwrap());
    let hist = Histogram::build(&region, &threshold(&region, 30, 180), 180).unwrap();
    let map = back_project(&hsv, &hist);

    let window = Rect::new(40, 40, 20, 20);
    let criteria = TerminationCriteria::default();
    for _ in 0..3 {
        let outcome = mean_shift(&map, window, &criteria).unwrap();
        assert!(outcome.converged);
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.window, window);
    }
}

#[test]
fn test_iteration_cap_and_containment() {
    // A block of mass in the bottom-right corner, partly under the start window.
    let map = ProbabilityMap::from_array(Array2::from_shape_fn((60, 60), |(y, x)| {
        if x >= 45 && y >= 45 { 200 } else { 0 }
    }));
    let criteria = TerminationCriteria {
        max_iterations: 3,
        min_shift: 0.0,
    };
    let mut tracker = MeanShiftTracker::new(criteria);
    tracker.seed(Rect::new(35, 35, 15, 15));

    for _ in 0..10 {
        let outcome = tracker.update(&map).unwrap();
        assert!(outcome.iterations <= 3);
        assert!(outcome.window.fits_within(60, 60));
    }
    assert_eq!(tracker.window(), Some(Rect::new(45, 45, 15, 15)));
}

#[test]
fn test_config_from_json() {
    let config: TrackerConfig =
        serde_json::from_str(r#"{ "low_s": 50, "criteria": { "max_iterations": 20 } }"#).unwrap();
    assert_eq!(config.low_s, 50);
    assert_eq!(config.high_s, 180);
    assert_eq!(config.bins, 180);
    assert_eq!(config.criteria.max_iterations, 20);
    assert_eq!(config.criteria.min_shift, 1.0);
    assert!(TrackingSession::new(config).is_ok());

    let outline: Outline = serde_json::from_str(r#"{ "thickness": 3 }"#).unwrap();
    assert_eq!(outline.color, [255, 0, 0, 255]);
}

struct Annotator {
    outline: Outline,
    rendered: Vec<Frame>,
    lost: usize,
}

impl RenderSink for Annotator {
    fn window(&mut self, frame: &Frame, window: Rect) {
        self.rendered.push(draw_outline(frame, window, &self.outline));
    }

    fn no_window(&mut self, frame: &Frame) {
        self.lost += 1;
        self.rendered.push(frame.clone());
    }
}

#[test]
fn test_pipeline_end_to_end() {
    let frames: Vec<Frame> = (0..8)
        .map(|i| synthetic_frame((20 + i * 4, 30 + i * 2), i as u64 * 33))
        .collect();
    let mut pipeline = TrackerPipeline::new(frames.into_iter(), TrackerConfig::default()).unwrap();
    let mut sink = Annotator {
        outline: Outline::default(),
        rendered: Vec::new(),
        lost: 0,
    };

    let roi = SelectionBuilder::new()
        .start(20.0, 30.0)
        .end(40.0, 50.0)
        .build();
    pipeline.select(roi);

    assert_eq!(pipeline.run(&mut sink).unwrap(), TickOutcome::EndOfStream);
    assert_eq!(sink.rendered.len(), 8);
    assert_eq!(sink.lost, 0);

    // Last square sits at (48, 44); the outline corner is drawn there.
    let last = sink.rendered.last().unwrap();
    assert_eq!(last.pixel(48, 44), Outline::default().color);
    assert_eq!(last.pixel(58, 54), TARGET);
}
