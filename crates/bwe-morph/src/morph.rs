//! The morphing engine.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use bwe_model::{Breakpoint, ConstantEnvelope, Envelope, Partial};
use tracing::debug;

use crate::distill::distill;

/// Label of partials that never correspond.
pub const UNLABELED: i32 = 0;

/// Label -> indices into an arena of borrowed partials.
type LabelGroups = BTreeMap<i32, Vec<usize>>;

/// Which morph source a crossfaded partial comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    A,
    B,
}

/// Morphs between two labeled partial collections.
///
/// Three weight functions of time control the morph: 0 reproduces source A,
/// 1 reproduces source B. Partials sharing a nonzero label across the two
/// sources are interpolated; all others are crossfaded under the amplitude
/// function. Morphed partials accumulate until taken with
/// [`take_partials`](Morph::take_partials).
#[derive(Clone)]
pub struct Morph {
    frequency_function: Arc<dyn Envelope>,
    amplitude_function: Arc<dyn Envelope>,
    bandwidth_function: Arc<dyn Envelope>,
    partials: Vec<Partial>,
}

impl Default for Morph {
    /// All three weights constant at 0, so a morph reproduces source A.
    fn default() -> Self {
        Self::new(Arc::new(ConstantEnvelope(0.0)))
    }
}

impl fmt::Debug for Morph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Morph")
            .field("partials", &self.partials.len())
            .finish_non_exhaustive()
    }
}

impl Morph {
    /// Creates a morph using one function for all three weights.
    pub fn new(function: Arc<dyn Envelope>) -> Self {
        Self::with_functions(function.clone(), function.clone(), function)
    }

    /// Creates a morph with separate frequency, amplitude, and bandwidth
    /// weight functions.
    pub fn with_functions(
        frequency: Arc<dyn Envelope>,
        amplitude: Arc<dyn Envelope>,
        bandwidth: Arc<dyn Envelope>,
    ) -> Self {
        Self {
            frequency_function: frequency,
            amplitude_function: amplitude,
            bandwidth_function: bandwidth,
            partials: Vec::new(),
        }
    }

    /// Replaces the frequency weight function.
    pub fn set_frequency_function(&mut self, function: Arc<dyn Envelope>) {
        self.frequency_function = function;
    }

    /// Replaces the amplitude weight function.
    pub fn set_amplitude_function(&mut self, function: Arc<dyn Envelope>) {
        self.amplitude_function = function;
    }

    /// Replaces the bandwidth weight function.
    pub fn set_bandwidth_function(&mut self, function: Arc<dyn Envelope>) {
        self.bandwidth_function = function;
    }

    /// The frequency weight function.
    pub fn frequency_function(&self) -> &dyn Envelope {
        self.frequency_function.as_ref()
    }

    /// The amplitude weight function.
    pub fn amplitude_function(&self) -> &dyn Envelope {
        self.amplitude_function.as_ref()
    }

    /// The bandwidth weight function.
    pub fn bandwidth_function(&self) -> &dyn Envelope {
        self.bandwidth_function.as_ref()
    }

    /// Morphed partials collected so far.
    pub fn partials(&self) -> &[Partial] {
        &self.partials
    }

    /// Removes and returns the morphed partials collected so far.
    pub fn take_partials(&mut self) -> Vec<Partial> {
        std::mem::take(&mut self.partials)
    }

    /// Morphs source `a` into source `b`, appending the results to
    /// [`partials`](Morph::partials).
    ///
    /// Labels are processed in ascending order. For each label present in
    /// both sources (other than [`UNLABELED`]), each side is distilled to a
    /// single partial and the two are interpolated. Partials of every other
    /// label are crossfaded and come out unlabeled; crossfaded partials that
    /// end up silent are dropped.
    pub fn morph<'a, 'b, A, B>(&mut self, a: A, b: B)
    where
        A: IntoIterator<Item = &'a Partial>,
        B: IntoIterator<Item = &'b Partial>,
    {
        let arena_a: Vec<&Partial> = a.into_iter().filter(|p| !p.is_empty()).collect();
        let arena_b: Vec<&Partial> = b.into_iter().filter(|p| !p.is_empty()).collect();
        let groups_a = group_by_label(&arena_a);
        let groups_b = group_by_label(&arena_b);

        let labels: BTreeSet<i32> = groups_a.keys().chain(groups_b.keys()).copied().collect();
        let before = self.partials.len();

        for label in labels {
            match (groups_a.get(&label), groups_b.get(&label)) {
                (Some(ia), Some(ib)) if label != UNLABELED => {
                    debug!(
                        "morphing label {} ({} -> {} partials)",
                        label,
                        ia.len(),
                        ib.len()
                    );
                    let p0 = representative(label, &arena_a, ia);
                    let p1 = representative(label, &arena_b, ib);
                    let morphed = self.morph_partial(&p0, &p1, label);
                    self.partials.push(morphed);
                }
                (ia, ib) => {
                    debug!("crossfading label {}", label);
                    let from_a = ia.into_iter().flatten().map(|&i| (arena_a[i], Side::A));
                    let from_b = ib.into_iter().flatten().map(|&i| (arena_b[i], Side::B));
                    let faded: Vec<Partial> = from_a
                        .chain(from_b)
                        .filter_map(|(p, side)| self.crossfade_partial(p, side))
                        .collect();
                    self.partials.extend(faded);
                }
            }
        }

        debug!(
            "morph produced {} partials",
            self.partials.len() - before
        );
    }

    /// Interpolates two corresponding partials into a new one with `label`.
    ///
    /// The result has a breakpoint at every breakpoint time of either
    /// source. Source parameters are interpolated at those times; a source's
    /// amplitude is 0 outside its span while its frequency and bandwidth
    /// hold their boundary values. Phase is taken from the source the
    /// frequency weight favors.
    pub fn morph_partial(&self, p0: &Partial, p1: &Partial, label: i32) -> Partial {
        let mut times: Vec<f64> = p0.iter().chain(p1.iter()).map(Breakpoint::time).collect();
        times.sort_by(f64::total_cmp);
        times.dedup();

        let mut out = Partial::with_label(label);
        for time in times {
            let wf = self.frequency_function.value_at(time);
            let wa = self.amplitude_function.value_at(time);
            let wb = self.bandwidth_function.value_at(time);

            let frequency = lerp(p0.frequency_at(time), p1.frequency_at(time), wf);
            let amplitude = lerp(p0.amplitude_at(time), p1.amplitude_at(time), wa);
            let bandwidth = lerp(p0.bandwidth_at(time), p1.bandwidth_at(time), wb);
            let phase = if wf < 0.5 {
                p0.phase_at(time)
            } else {
                p1.phase_at(time)
            };

            // Breakpoint::new clamps amplitude and bandwidth to be non-negative.
            out.insert(Breakpoint::new(time, frequency, amplitude, bandwidth, phase));
        }
        out
    }

    /// Scales a non-corresponding partial by the amplitude weight, fading
    /// source A out and source B in. Returns `None` if nothing audible is left.
    fn crossfade_partial(&self, partial: &Partial, side: Side) -> Option<Partial> {
        let mut out = Partial::with_label(UNLABELED);
        for bp in partial {
            let w = self.amplitude_function.value_at(bp.time());
            let gain = match side {
                Side::A => 1.0 - w,
                Side::B => w,
            };
            out.insert(bp.with_amplitude(bp.amplitude() * gain));
        }
        out.iter().any(|bp| bp.amplitude() > 0.0).then_some(out)
    }
}

/// Morphs `a` into `b` with a fresh engine and returns the result.
pub fn morph_collections<'a, 'b, A, B>(
    a: A,
    b: B,
    frequency: Arc<dyn Envelope>,
    amplitude: Arc<dyn Envelope>,
    bandwidth: Arc<dyn Envelope>,
) -> Vec<Partial>
where
    A: IntoIterator<Item = &'a Partial>,
    B: IntoIterator<Item = &'b Partial>,
{
    let mut morph = Morph::with_functions(frequency, amplitude, bandwidth);
    morph.morph(a, b);
    morph.take_partials()
}

fn group_by_label(arena: &[&Partial]) -> LabelGroups {
    let mut groups = LabelGroups::new();
    for (i, p) in arena.iter().enumerate() {
        groups.entry(p.label()).or_default().push(i);
    }
    groups
}

/// The single partial standing for a label group on one side.
fn representative<'p>(label: i32, arena: &[&'p Partial], indices: &[usize]) -> Cow<'p, Partial> {
    match indices {
        [only] => Cow::Borrowed(arena[*only]),
        _ => {
            let members: Vec<&Partial> = indices.iter().map(|&i| arena[i]).collect();
            Cow::Owned(distill(label, &members))
        }
    }
}

fn lerp(x0: f64, x1: f64, weight: f64) -> f64 {
    (1.0 - weight) * x0 + weight * x1
}
