use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use specrel::prelude::*;

fn near(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * (1.0 + a.abs().max(b.abs()))
}

// Worked example: a boost at 3/5 c has gamma 5/4.
#[test]
fn golden_boost_three_fifths() {
    let moved = lorentz_transformed(&Event::new(2.0, 3.0), 0.6, ORIGIN);
    assert!(near(moved.t, 0.25, 1e-12));
    assert!(near(moved.x, 2.25, 1e-12));
    assert!(near(moved.interval(), Event::new(2.0, 3.0).interval(), 1e-12));
}

#[test]
fn golden_grid_draws_every_line() {
    let mut grid = stgrid((-2.0, 2.0), (-2.0, 2.0), &GridCfg::default());
    grid.lorentz_transform(0.5, ORIGIN);
    let mut rec = Recorder::new();
    grid.draw(&mut rec, (Some(-2.0), Some(2.0)), (Some(-2.0), Some(2.0)), &DrawOptions::new());
    // 4 + 4 minor lines and 2 axes, all through the window after the boost.
    assert_eq!(rec.segments.len(), 10);
    assert_eq!(rec.tlim, Some((-2.0, 2.0)));
}

// Seeded sweep over offset origins, including the boost round-trip.
#[test]
fn seeded_events_round_trip_about_offset_origins() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..500 {
        let v = rng.gen_range(-0.95..0.95);
        let origin = (rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
        let e = Event::new(rng.gen_range(-20.0..20.0), rng.gen_range(-20.0..20.0));
        let back = lorentz_boosted(&lorentz_transformed(&e, v, origin), v, origin);
        assert!(near(back.t, e.t, 1e-9), "t drifted for v={v}");
        assert!(near(back.x, e.x, 1e-9), "x drifted for v={v}");
        // The interval about the transform origin is invariant.
        let rel = |p: &Event| Event::new(p.t - origin.0, p.x - origin.1).interval();
        let moved = lorentz_transformed(&e, v, origin);
        assert!(near(rel(&moved), rel(&e), 1e-9));
    }
}

proptest! {
    #[test]
    fn prop_intersection_is_symmetric(
        theta1 in 0.0_f64..std::f64::consts::PI,
        theta2 in 0.0_f64..std::f64::consts::PI,
        t1 in -5.0_f64..5.0_f64,
        x1 in -5.0_f64..5.0_f64,
        t2 in -5.0_f64..5.0_f64,
        x2 in -5.0_f64..5.0_f64
    ) {
        prop_assume!((theta1 - theta2).sin().abs() > 0.1);
        let a = Line::new((theta1.sin(), theta1.cos()), (t1, x1)).unwrap();
        let b = Line::new((theta2.sin(), theta2.cos()), (t2, x2)).unwrap();
        let ab = a.intersect(&b).point();
        let ba = b.intersect(&a).point();
        prop_assert!(ab.is_some() && ba.is_some());
        let (ab, ba) = (ab.unwrap(), ba.unwrap());
        prop_assert!(near(ab.t, ba.t, 1e-9));
        prop_assert!(near(ab.x, ba.x, 1e-9));
    }

    #[test]
    fn prop_interval_is_invariant(
        v in -0.9_f64..0.9_f64,
        t in -10.0_f64..10.0_f64,
        x in -10.0_f64..10.0_f64
    ) {
        let e = Event::new(t, x);
        let moved = lorentz_transformed(&e, v, ORIGIN);
        prop_assert!(near(moved.interval(), e.interval(), 1e-9));
    }

    #[test]
    fn prop_boost_undoes_transform(
        v in -0.9_f64..0.9_f64,
        theta in 0.0_f64..std::f64::consts::TAU,
        t0 in -5.0_f64..5.0_f64,
        x0 in -5.0_f64..5.0_f64,
        origin_t in -3.0_f64..3.0_f64,
        origin_x in -3.0_f64..3.0_f64
    ) {
        let line = Line::new((theta.sin(), theta.cos()), (t0, x0)).unwrap();
        let there = lorentz_transformed(&line, v, (origin_t, origin_x));
        let back = lorentz_boosted(&there, v, (origin_t, origin_x));
        prop_assert!(near(back.anchor().t, t0, 1e-9));
        prop_assert!(near(back.anchor().x, x0, 1e-9));
        prop_assert!(near(back.direction().t, theta.sin(), 1e-9));
        prop_assert!(near(back.direction().x, theta.cos(), 1e-9));
    }

    #[test]
    fn prop_line_through_window_draws_one_segment(
        theta in 0.0_f64..std::f64::consts::TAU,
        t0 in 0.05_f64..0.95_f64,
        x0 in 0.05_f64..0.95_f64
    ) {
        let line = Line::new((theta.sin(), theta.cos()), (t0, x0)).unwrap();
        let mut rec = Recorder::new();
        line.draw(&mut rec, (Some(0.0), Some(1.0)), (Some(0.0), Some(1.0)), &DrawOptions::new());
        prop_assert_eq!(rec.segments.len(), 1);
        prop_assert!(rec.points.is_empty());
        let seg = &rec.segments[0];
        for (t, x) in [seg.start, seg.end] {
            prop_assert!((-1e-6..=1.0 + 1e-6).contains(&t));
            prop_assert!((-1e-6..=1.0 + 1e-6).contains(&x));
            // On the line: (p - anchor) is parallel to the direction.
            let cross = (t - t0) * theta.cos() - (x - x0) * theta.sin();
            prop_assert!(cross.abs() < 1e-6);
        }
    }

    #[test]
    fn prop_ribbon_vertices_stay_in_window_and_region(
        theta in 0.0_f64..std::f64::consts::PI,
        t1 in -2.0_f64..2.0_f64,
        x1 in -2.0_f64..2.0_f64,
        t2 in -2.0_f64..2.0_f64,
        x2 in -2.0_f64..2.0_f64
    ) {
        let dir = (theta.sin(), theta.cos());
        let ribbon = Ribbon::new(Line::new(dir, (t1, x1)).unwrap(), Line::new(dir, (t2, x2)).unwrap()).unwrap();
        let verts = ribbon.vertices((-1.0, 1.0), (-1.0, 1.0));
        for v in &verts {
            prop_assert!(v.in_bounds((-1.0, 1.0), (-1.0, 1.0)));
            prop_assert!(ribbon.point_inside(v));
        }
        for pair in verts.windows(2) {
            prop_assert!(pair[0] != pair[1]);
        }
    }
}
