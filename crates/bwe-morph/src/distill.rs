//! Collapsing same-labeled partials into one representative partial.

use std::f64::consts::TAU;

use bwe_model::{Breakpoint, Partial};

/// Longest zero-amplitude ramp inserted around a gap between members.
const GAP_FADE: f64 = 0.001;

/// Combines several partials into one with the given label.
///
/// The result has a breakpoint at every breakpoint time of every member. At
/// each time, amplitudes of the members sounding at that instant are summed,
/// frequency is their amplitude-weighted mean and bandwidth their
/// energy-weighted mean. Phase comes from the loudest member. Where no member
/// sounds, zero-amplitude breakpoints bracket the gap.
pub fn distill(label: i32, members: &[&Partial]) -> Partial {
    let members: Vec<&Partial> = members.iter().copied().filter(|p| !p.is_empty()).collect();

    let mut times: Vec<f64> = members
        .iter()
        .flat_map(|p| p.iter().map(Breakpoint::time))
        .collect();
    times.sort_by(f64::total_cmp);
    times.dedup();

    let mut out = Partial::with_label(label);
    let mut previous: Option<Breakpoint> = None;
    for time in times {
        let bp = combine(&members, time);
        if let Some(prev) = previous {
            let midpoint = 0.5 * (prev.time() + time);
            if !members.iter().any(|p| sounds_at(p, midpoint)) {
                let (before, after) = bracket_gap(&prev, &bp);
                out.insert(before);
                out.insert(after);
            }
        }
        out.insert(bp);
        previous = Some(bp);
    }
    out
}

fn sounds_at(partial: &Partial, time: f64) -> bool {
    partial.start_time() <= time && time <= partial.end_time()
}

/// Breakpoint summarizing all members sounding at `time`.
fn combine(members: &[&Partial], time: f64) -> Breakpoint {
    let active: Vec<&Partial> = members
        .iter()
        .copied()
        .filter(|p| sounds_at(p, time))
        .collect();

    let amplitude: f64 = active.iter().map(|p| p.amplitude_at(time)).sum();
    let frequency = weighted_mean(
        &active,
        |p| p.amplitude_at(time),
        |p| p.frequency_at(time),
    );
    let bandwidth = weighted_mean(
        &active,
        |p| p.amplitude_at(time).powi(2),
        |p| p.bandwidth_at(time),
    );
    let phase = active
        .iter()
        .max_by(|a, b| a.amplitude_at(time).total_cmp(&b.amplitude_at(time)))
        .map_or(0.0, |p| p.phase_at(time));

    Breakpoint::new(time, frequency, amplitude, bandwidth, phase)
}

/// Weighted mean of `value`, falling back to the plain mean when every weight
/// is zero.
fn weighted_mean(
    partials: &[&Partial],
    weight: impl Fn(&Partial) -> f64,
    value: impl Fn(&Partial) -> f64,
) -> f64 {
    match partials {
        [] => return 0.0,
        [only] => return value(only),
        _ => {}
    }
    let total: f64 = partials.iter().map(|p| weight(p)).sum();
    if total > 0.0 {
        partials.iter().map(|p| weight(p) * value(p)).sum::<f64>() / total
    } else {
        partials.iter().map(|p| value(p)).sum::<f64>() / partials.len() as f64
    }
}

/// Zero-amplitude breakpoints just after `before` and just before `after`.
fn bracket_gap(before: &Breakpoint, after: &Breakpoint) -> (Breakpoint, Breakpoint) {
    let d = GAP_FADE.min((after.time() - before.time()) / 3.0);
    let fade_out = Breakpoint::new(
        before.time() + d,
        before.frequency(),
        0.0,
        before.bandwidth(),
        before.phase() + TAU * before.frequency() * d,
    );
    let fade_in = Breakpoint::new(
        after.time() - d,
        after.frequency(),
        0.0,
        after.bandwidth(),
        after.phase() - TAU * after.frequency() * d,
    );
    (fade_out, fade_in)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn constant(start: f64, end: f64, freq: f64, amp: f64, bw: f64) -> Partial {
        Partial::from_breakpoints(
            7,
            [
                Breakpoint::new(start, freq, amp, bw, 0.0),
                Breakpoint::new(end, freq, amp, bw, 0.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_single_member_is_unchanged() {
        let p = constant(0.0, 1.0, 200.0, 0.3, 0.1);
        let d = distill(9, &[&p]);
        assert_eq!(d.label(), 9);
        assert_eq!(d.breakpoints(), p.breakpoints());
    }

    #[test]
    fn test_overlapping_amplitudes_sum() {
        let a = constant(0.0, 1.0, 100.0, 0.3, 0.0);
        let b = constant(0.5, 1.5, 200.0, 0.4, 0.0);
        let d = distill(7, &[&a, &b]);

        let times: Vec<f64> = d.iter().map(Breakpoint::time).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0, 1.5]);
        assert!((d.amplitude_at(0.75) - 0.7).abs() < 1e-12);

        for i in 0..=30 {
            let t = i as f64 * 0.05;
            assert!(d.amplitude_at(t) + 1e-12 >= a.amplitude_at(t));
            assert!(d.amplitude_at(t) + 1e-12 >= b.amplitude_at(t));
        }
    }

    #[test]
    fn test_frequency_weighted_by_amplitude() {
        let a = constant(0.0, 1.0, 100.0, 0.1, 0.0);
        let b = constant(0.0, 1.0, 200.0, 0.3, 0.0);
        let d = distill(7, &[&a, &b]);
        assert!((d.frequency_at(0.5) - 175.0).abs() < 1e-9);
    }

    #[test]
    fn test_bandwidth_weighted_by_energy() {
        let a = constant(0.0, 1.0, 100.0, 0.1, 1.0);
        let b = constant(0.0, 1.0, 200.0, 0.3, 0.0);
        let d = distill(7, &[&a, &b]);
        // 0.01 * 1.0 / (0.01 + 0.09)
        assert!((d.bandwidth_at(0.5) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_gap_between_members_is_silent() {
        let a = constant(0.0, 1.0, 100.0, 0.5, 0.0);
        let b = constant(2.0, 3.0, 120.0, 0.5, 0.0);
        let d = distill(7, &[&b, &a]);

        assert_eq!(d.len(), 6);
        assert_eq!(d.amplitude_at(1.5), 0.0);
        assert!((d.breakpoints()[2].time() - 1.001).abs() < 1e-12);
        assert!((d.breakpoints()[3].time() - 1.999).abs() < 1e-12);
        assert_eq!(d.breakpoints()[3].frequency(), 120.0);
    }

    #[test]
    fn test_short_gap_bracket_stays_inside_gap() {
        let a = constant(0.0, 1.0, 100.0, 0.5, 0.0);
        let b = constant(1.0015, 2.0, 100.0, 0.5, 0.0);
        let d = distill(7, &[&a, &b]);

        let times: Vec<f64> = d.iter().map(Breakpoint::time).collect();
        assert_eq!(times.len(), 6);
        assert!(times.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_members_ignored() {
        let a = constant(0.0, 1.0, 100.0, 0.5, 0.0);
        let empty = Partial::new();
        let d = distill(3, &[&empty, &a]);
        assert_eq!(d.breakpoints(), a.breakpoints());
        assert!(distill(3, &[&empty]).is_empty());
    }
}
