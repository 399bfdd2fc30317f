use std::ops::Index;

use crate::{
    any::difficulty::object::IDifficultyObject,
    taiko::object::{HitType, TaikoObject},
};

use super::{
    color::{ColorEncoding, TaikoDifficultyColor},
    rhythm::{closest_rhythm, HitObjectRhythm},
};

/// A [`TaikoObject`] annotated with metrics relative to its predecessors.
///
/// The first two hit objects of a chart have no difficulty object, i.e. the
/// difficulty object at index `i` belongs to hit object `i + 2`.
#[derive(Clone, Debug)]
pub struct TaikoDifficultyObject<'a> {
    pub idx: usize,
    pub base: &'a TaikoObject,
    /// Start time adjusted by the clock rate.
    pub start_time: f64,
    /// Time since the previous object's start, adjusted by the clock rate.
    pub delta_time: f64,
    /// Scroll speed as BPM, adjusted by the clock rate.
    pub effective_bpm: f64,
    /// `None` for drum rolls and swells.
    pub hit_type: Option<HitType>,
    pub rhythm: HitObjectRhythm,
    /// Index among all objects of the same colour.
    pub mono_idx: Option<usize>,
    /// Index among all notes.
    pub note_idx: Option<usize>,
    pub color: TaikoDifficultyColor,
}

impl<'a> TaikoDifficultyObject<'a> {
    pub fn new(
        hit_object: &'a TaikoObject,
        last_object: &TaikoObject,
        last_last_object: &TaikoObject,
        clock_rate: f64,
        idx: usize,
    ) -> Self {
        let delta_time = (hit_object.start_time - last_object.start_time) / clock_rate;
        let prev_len = (last_object.start_time - last_last_object.start_time) / clock_rate;

        #[cfg(feature = "tracing")]
        if delta_time < 0.0 {
            tracing::warn!(
                start_time = hit_object.start_time,
                prev_start_time = last_object.start_time,
                "hit objects are not ordered by start time"
            );
        }

        Self {
            idx,
            base: hit_object,
            start_time: hit_object.start_time / clock_rate,
            delta_time,
            effective_bpm: hit_object.effective_bpm * clock_rate,
            hit_type: hit_object.hit_type(),
            rhythm: closest_rhythm(delta_time, prev_len),
            mono_idx: None,
            note_idx: None,
            color: TaikoDifficultyColor::default(),
        }
    }

    pub const fn is_hit(&self) -> bool {
        self.hit_type.is_some()
    }
}

impl IDifficultyObject for TaikoDifficultyObject<'_> {
    type DifficultyObjects = [Self];

    fn idx(&self) -> usize {
        self.idx
    }
}

/// All difficulty objects of a chart plus per-colour and per-note lookups.
#[derive(Clone, Debug, Default)]
pub struct TaikoDifficultyObjects<'a> {
    pub objects: Vec<TaikoDifficultyObject<'a>>,
    /// Indices of all centre hits.
    pub centres: Vec<usize>,
    /// Indices of all rim hits.
    pub rims: Vec<usize>,
    /// Indices of all hits.
    pub notes: Vec<usize>,
    pub color: ColorEncoding,
}

impl<'a> TaikoDifficultyObjects<'a> {
    /// Annotate each hit object with its rhythm and colour relative to its
    /// predecessors.
    pub fn new(hit_objects: &'a [TaikoObject], clock_rate: f64) -> Self {
        let mut this = Self::default();

        for (i, window) in hit_objects.windows(3).enumerate() {
            let [last_last, last, curr] = window else {
                continue;
            };

            let mut diff_object = TaikoDifficultyObject::new(curr, last, last_last, clock_rate, i);

            if let Some(hit_type) = diff_object.hit_type {
                let monos = match hit_type {
                    HitType::Centre => &mut this.centres,
                    HitType::Rim => &mut this.rims,
                };

                diff_object.mono_idx = Some(monos.len());
                diff_object.note_idx = Some(this.notes.len());
                monos.push(i);
                this.notes.push(i);
            }

            this.objects.push(diff_object);
        }

        this.color = ColorEncoding::encode_and_assign(&mut this.objects, &this.notes);

        this
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaikoDifficultyObject<'a>> {
        self.objects.iter()
    }

    /// The object of the same colour `backwards_idx + 1` steps before `curr`.
    pub fn previous_mono(
        &self,
        curr: &TaikoDifficultyObject<'_>,
        backwards_idx: usize,
    ) -> Option<&TaikoDifficultyObject<'a>> {
        let monos = match curr.hit_type? {
            HitType::Centre => &self.centres,
            HitType::Rim => &self.rims,
        };

        curr.mono_idx?
            .checked_sub(backwards_idx + 1)
            .and_then(|idx| monos.get(idx))
            .map(|&idx| &self.objects[idx])
    }

    /// The note `backwards_idx + 1` notes before `curr`.
    pub fn previous_note(
        &self,
        curr: &TaikoDifficultyObject<'_>,
        backwards_idx: usize,
    ) -> Option<&TaikoDifficultyObject<'a>> {
        curr.note_idx?
            .checked_sub(backwards_idx + 1)
            .and_then(|idx| self.notes.get(idx))
            .map(|&idx| &self.objects[idx])
    }

    /// The note `forwards_idx + 1` notes after `curr`.
    pub fn next_note(
        &self,
        curr: &TaikoDifficultyObject<'_>,
        forwards_idx: usize,
    ) -> Option<&TaikoDifficultyObject<'a>> {
        curr.note_idx
            .and_then(|idx| self.notes.get(idx + forwards_idx + 1))
            .map(|&idx| &self.objects[idx])
    }
}

impl<'a> Index<usize> for TaikoDifficultyObjects<'a> {
    type Output = TaikoDifficultyObject<'a>;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.objects[idx]
    }
}
