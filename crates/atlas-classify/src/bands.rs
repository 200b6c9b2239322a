//! Priority bands.
//!
//! A classification is an ordered list of bands, each pairing a year
//! predicate with a color. A region takes the color of the highest-ranked
//! band matched by any of its records; regions matched by no band keep the
//! default color. This yields the same map as painting every band in rank
//! order and letting later bands overwrite earlier ones.
//!
//! | Mode          | Rank 0 (lowest)        | Rank 1                    | Rank 2          |
//! |---------------|------------------------|---------------------------|-----------------|
//! | no year       | all records            |                           |                 |
//! | single `Y`    | year > Y (post)        | year <= Y (pre)           |                 |
//! | dual `Y1, Y2` | year > Y2 (third)      | Y1 < year <= Y2 (second)  | year <= Y1 (first) |
//!
//! Older records win: a region with any record at or before the boundary
//! shows the "pre"/"first" color even when newer records exist.

use std::collections::BTreeMap;

use serde::Serialize;

use atlas_model::{ColorSlot, MissingYearPolicy, ResolvedColor, YearBoundaries};

/// Which record years a band accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum YearPredicate {
    /// Every record, dated or not.
    Any,
    /// `year <= bound`
    AtMost { bound: i32 },
    /// `year > bound`
    After { bound: i32 },
    /// `after < year <= up_to`
    Within { after: i32, up_to: i32 },
}

impl YearPredicate {
    pub fn matches(self, year: Option<i32>, policy: MissingYearPolicy) -> bool {
        match (self, year) {
            (Self::Any, _) => true,
            (Self::AtMost { .. }, None) => policy == MissingYearPolicy::AssumeOlder,
            (_, None) => false,
            (Self::AtMost { bound }, Some(year)) => year <= bound,
            (Self::After { bound }, Some(year)) => year > bound,
            (Self::Within { after, up_to }, Some(year)) => year > after && year <= up_to,
        }
    }
}

/// One colored band of a classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityBand {
    pub slot: ColorSlot,
    /// Position in the paint order; higher ranks win.
    pub rank: usize,
    pub predicate: YearPredicate,
    pub color: ResolvedColor,
}

/// Color slots a boundary mode uses, in validation order.
///
/// Single-boundary mode validates its three slots even when no year is set,
/// since the "All Records" color and both period colors share one form.
pub fn slots_for(boundaries: &YearBoundaries) -> &'static [ColorSlot] {
    if boundaries.is_dual() {
        &[
            ColorSlot::FirstPeriod,
            ColorSlot::SecondPeriod,
            ColorSlot::ThirdPeriod,
        ]
    } else {
        &[ColorSlot::Pre, ColorSlot::Post, ColorSlot::All]
    }
}

/// Builds the bands for a boundary mode, lowest rank first.
///
/// Slots absent from `colors` are skipped; callers pass the output of
/// [`crate::validate_colors`] for [`slots_for`].
pub fn build_bands(
    boundaries: &YearBoundaries,
    colors: &BTreeMap<ColorSlot, ResolvedColor>,
) -> Vec<PriorityBand> {
    let layout: Vec<(ColorSlot, YearPredicate)> = match *boundaries {
        YearBoundaries::None => vec![(ColorSlot::All, YearPredicate::Any)],
        YearBoundaries::Single { year } => vec![
            (ColorSlot::Post, YearPredicate::After { bound: year }),
            (ColorSlot::Pre, YearPredicate::AtMost { bound: year }),
        ],
        YearBoundaries::Dual { boundary } => vec![
            (
                ColorSlot::ThirdPeriod,
                YearPredicate::After {
                    bound: boundary.second(),
                },
            ),
            (
                ColorSlot::SecondPeriod,
                YearPredicate::Within {
                    after: boundary.first(),
                    up_to: boundary.second(),
                },
            ),
            (
                ColorSlot::FirstPeriod,
                YearPredicate::AtMost {
                    bound: boundary.first(),
                },
            ),
        ],
    };

    layout
        .into_iter()
        .filter_map(|(slot, predicate)| colors.get(&slot).map(|color| (slot, predicate, color)))
        .enumerate()
        .map(|(rank, (slot, predicate, color))| PriorityBand {
            slot,
            rank,
            predicate,
            color: color.clone(),
        })
        .collect()
}
