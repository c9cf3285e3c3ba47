//! Component balancing
//!
//! Splits a nugget total across an alloy's components so that the parts
//! always add up to the total, then checks every part against its recipe
//! range. One component may be held at a user-chosen value while the rest
//! absorb the difference.
//!
//! Nothing here keeps state between calls: the caller owns the current
//! slider values and passes them in as `prior`.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{Alloy, Component};
use crate::units::round_half_up;

pub type Nuggets = i64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViolationKind {
    /// The component's actual share falls outside its recipe range
    OutOfRange { percent: f64, min: f64, max: f64 },
    /// No usable value: the held component had no prior value
    NotANumber,
    Negative { nuggets: Nuggets },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub metal_id: String,
    pub kind: ViolationKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub metal_id: String,
    pub nuggets: Nuggets,
    pub percent: f64,
}

/// Every component within its range
#[derive(Debug, Clone, PartialEq)]
pub struct Balanced {
    pub total: Nuggets,
    pub shares: Vec<Share>,
}

impl Balanced {
    pub fn share(&self, metal_id: &str) -> Option<&Share> {
        self.shares.iter().find(|s| s.metal_id == metal_id)
    }

    pub fn nuggets(&self, metal_id: &str) -> Option<Nuggets> {
        self.share(metal_id).map(|s| s.nuggets)
    }
}

/// At least one component violates its range or has no usable value
#[derive(Debug, Clone, PartialEq)]
pub struct Invalid {
    pub total: Nuggets,
    /// New value per component in recipe order; `None` where nothing could be computed
    pub values: Vec<(String, Option<Nuggets>)>,
    /// In recipe order
    pub violations: Vec<Violation>,
}

impl Invalid {
    /// The violation surfaced as the single user-facing message.
    ///
    /// Messages are written in component order and each one replaces the
    /// previous, so the last violation is the one shown.
    pub fn headline(&self) -> Option<&Violation> {
        self.violations.last()
    }

    pub fn is_flagged(&self, metal_id: &str) -> bool {
        self.violations.iter().any(|v| v.metal_id == metal_id)
    }

    pub fn nuggets(&self, metal_id: &str) -> Option<Nuggets> {
        self.values
            .iter()
            .find(|(id, _)| id == metal_id)
            .and_then(|(_, n)| *n)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Total not a positive number or no components: nothing to show
    NoComputation,
    Balanced(Balanced),
    Invalid(Invalid),
}

impl Outcome {
    /// Slider positions to write back, keyed by metal id.
    ///
    /// Components without a usable value are left out.
    pub fn values(&self) -> HashMap<String, Nuggets> {
        match self {
            Outcome::NoComputation => HashMap::new(),
            Outcome::Balanced(b) => b
                .shares
                .iter()
                .map(|s| (s.metal_id.clone(), s.nuggets))
                .collect(),
            Outcome::Invalid(inv) => inv
                .values
                .iter()
                .filter_map(|(id, n)| n.map(|n| (id.clone(), n)))
                .collect(),
        }
    }

    pub fn is_balanced(&self) -> bool {
        matches!(self, Outcome::Balanced(_))
    }
}

/// Advisory slider range for one component at a given total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentBounds {
    pub metal_id: String,
    pub min_nuggets: Nuggets,
    pub max_nuggets: Nuggets,
}

impl ComponentBounds {
    fn for_component(comp: &Component, total_nuggets: f64) -> Self {
        Self {
            metal_id: comp.metal_id.clone(),
            min_nuggets: (comp.min_percent * total_nuggets / 100.0).ceil() as Nuggets,
            max_nuggets: (comp.max_percent * total_nuggets / 100.0).floor() as Nuggets,
        }
    }

    /// Clamp into the range; the lower bound wins when the bounds cross
    pub fn clamp(&self, value: Nuggets) -> Nuggets {
        value.min(self.max_nuggets).max(self.min_nuggets)
    }

    pub fn contains(&self, value: Nuggets) -> bool {
        self.min_nuggets <= value && value <= self.max_nuggets
    }
}

fn is_valid_total(total_nuggets: f64) -> bool {
    total_nuggets.is_finite() && total_nuggets > 0.0
}

/// The integer nugget total a recompute works with, if there is one
pub fn target_nuggets(total_nuggets: f64) -> Option<Nuggets> {
    if !is_valid_total(total_nuggets) {
        return None;
    }
    let total = round_half_up(total_nuggets) as Nuggets;
    (total > 0).then_some(total)
}

/// Advisory nugget bounds per component, in recipe order.
///
/// These clamp slider input before a recompute. They round the range
/// inwards, so they can disagree by one nugget with the percent check made
/// by [`recompute`]. `None` exactly when [`recompute`] would compute nothing.
pub fn bounds(alloy: &Alloy, total_nuggets: f64) -> Option<Vec<ComponentBounds>> {
    target_nuggets(total_nuggets)?;
    Some(
        alloy
            .components
            .iter()
            .map(|comp| ComponentBounds::for_component(comp, total_nuggets))
            .collect(),
    )
}

/// Bring every current value inside its advisory bounds.
///
/// A missing or out-of-bounds value is replaced by the component's midpoint
/// share of the total, clamped into the bounds. Values already inside are
/// kept. Returns `prior` unchanged when the total is not valid.
pub fn reconcile(
    alloy: &Alloy,
    total_nuggets: f64,
    prior: &HashMap<String, Nuggets>,
) -> HashMap<String, Nuggets> {
    let Some(all_bounds) = bounds(alloy, total_nuggets) else {
        return prior.clone();
    };

    let mut values = prior.clone();
    for (comp, range) in alloy.components.iter().zip(&all_bounds) {
        let current = prior.get(&comp.metal_id).copied();
        if current.is_some_and(|v| range.contains(v)) {
            continue;
        }
        let midpoint = round_half_up(comp.default_weight() * total_nuggets / 100.0) as Nuggets;
        values.insert(comp.metal_id.clone(), range.clamp(midpoint));
    }
    values
}

/// Recompute every component's nuggets for `total_nuggets`.
///
/// `edited` names the component the user just changed; its value in `prior`
/// is held and the others are redistributed around it. `None` (or a metal
/// that is not part of the alloy) is a global update.
///
/// Two-component alloys are complementary: the held component, or the first
/// one on a global update, keeps its prior value and the other gets the rest.
/// Larger alloys are spread by default weight on a global update.
pub fn recompute(
    alloy: &Alloy,
    total_nuggets: f64,
    edited: Option<&str>,
    prior: &HashMap<String, Nuggets>,
) -> Outcome {
    let Some(total) = target_nuggets(total_nuggets) else {
        return Outcome::NoComputation;
    };
    if alloy.components.is_empty() {
        return Outcome::NoComputation;
    }

    let edited = edited.filter(|id| alloy.components.len() > 1 && alloy.contains(id));

    let values = match alloy.components.as_slice() {
        [first, second] => complement(first, second, total, edited, prior),
        components => match edited {
            None => {
                let all: Vec<&Component> = components.iter().collect();
                spread(&all, total).into_iter().map(Some).collect()
            }
            Some(held) => redistribute(components, total, held, prior),
        },
    };

    debug!(alloy = %alloy.id, total, ?edited, ?values, "recomputed components");
    validate(alloy, total, values)
}

fn complement(
    first: &Component,
    second: &Component,
    total: Nuggets,
    edited: Option<&str>,
    prior: &HashMap<String, Nuggets>,
) -> Vec<Option<Nuggets>> {
    if edited == Some(second.metal_id.as_str()) {
        let held = prior.get(&second.metal_id).copied();
        vec![held.map(|v| total.saturating_sub(v)), held]
    } else {
        let held = prior.get(&first.metal_id).copied();
        vec![held, held.map(|v| total.saturating_sub(v))]
    }
}

/// Split `amount` by default weight; the last component takes whatever
/// rounding left over so the parts sum to `amount` exactly.
fn spread(components: &[&Component], amount: Nuggets) -> Vec<Nuggets> {
    let weight_sum: f64 = components.iter().map(|c| c.default_weight()).sum();
    let last = components.len().saturating_sub(1);

    let mut assigned = 0;
    components
        .iter()
        .enumerate()
        .map(|(i, comp)| {
            let nuggets = if i == last {
                amount.saturating_sub(assigned)
            } else if weight_sum > 0.0 {
                round_half_up(comp.default_weight() / weight_sum * amount as f64) as Nuggets
            } else {
                0
            };
            assigned = assigned.saturating_add(nuggets);
            nuggets
        })
        .collect()
}

fn redistribute(
    components: &[Component],
    total: Nuggets,
    held: &str,
    prior: &HashMap<String, Nuggets>,
) -> Vec<Option<Nuggets>> {
    let held_value = prior.get(held).copied();
    let others: Vec<&Component> = components.iter().filter(|c| c.metal_id != held).collect();

    let spread_values: Vec<Option<Nuggets>> = match held_value {
        Some(v) => spread(&others, total.saturating_sub(v)).into_iter().map(Some).collect(),
        None => vec![None; others.len()],
    };
    let mut spread_values = spread_values.into_iter();

    components
        .iter()
        .map(|comp| {
            if comp.metal_id == held {
                held_value
            } else {
                spread_values.next().flatten()
            }
        })
        .collect()
}

fn validate(alloy: &Alloy, total: Nuggets, values: Vec<Option<Nuggets>>) -> Outcome {
    let mut shares = Vec::with_capacity(values.len());
    let mut violations = Vec::new();

    for (comp, value) in alloy.components.iter().zip(&values) {
        let kind = match *value {
            None => Some(ViolationKind::NotANumber),
            Some(n) if n < 0 => Some(ViolationKind::Negative { nuggets: n }),
            Some(n) => {
                let percent = n as f64 * 100.0 / total as f64;
                if comp.admits(percent) {
                    shares.push(Share {
                        metal_id: comp.metal_id.clone(),
                        nuggets: n,
                        percent,
                    });
                    None
                } else {
                    Some(ViolationKind::OutOfRange {
                        percent,
                        min: comp.min_percent,
                        max: comp.max_percent,
                    })
                }
            }
        };

        if let Some(kind) = kind {
            violations.push(Violation {
                metal_id: comp.metal_id.clone(),
                kind,
            });
        }
    }

    if violations.is_empty() {
        return Outcome::Balanced(Balanced { total, shares });
    }

    Outcome::Invalid(Invalid {
        total,
        values: alloy
            .components
            .iter()
            .map(|c| c.metal_id.clone())
            .zip(values)
            .collect(),
        violations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prior(entries: &[(&str, Nuggets)]) -> HashMap<String, Nuggets> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn tin_bronze() -> Alloy {
        Alloy::new(
            "tinbronze",
            vec![Component::new("copper", 88.0, 92.0), Component::new("tin", 8.0, 12.0)],
        )
    }

    fn bismuth_bronze() -> Alloy {
        Alloy::new(
            "bismuthbronze",
            vec![
                Component::new("copper", 45.0, 55.0),
                Component::new("zinc", 25.0, 35.0),
                Component::new("bismuth", 15.0, 25.0),
            ],
        )
    }

    #[test]
    fn invalid_totals_compute_nothing() {
        let alloy = tin_bronze();
        let values = prior(&[("copper", 90)]);
        for total in [0.0, -5.0, f64::NAN, f64::INFINITY, 0.2] {
            assert_eq!(recompute(&alloy, total, None, &values), Outcome::NoComputation);
        }
        assert!(bounds(&alloy, 0.0).is_none());
    }

    #[test]
    fn totals_rounding_to_zero_have_no_bounds() {
        assert!(bounds(&tin_bronze(), 0.4).is_none());
        assert!(bounds(&tin_bronze(), 0.5).is_some());
    }

    #[test]
    fn extreme_prior_values_do_not_overflow() {
        let outcome = recompute(&tin_bronze(), 100.0, None, &prior(&[("copper", i64::MIN)]));
        let Outcome::Invalid(inv) = &outcome else {
            panic!("expected invalid, got {outcome:?}");
        };
        assert_eq!(inv.nuggets("tin"), Some(i64::MAX));

        let outcome = recompute(
            &bismuth_bronze(),
            100.0,
            Some("zinc"),
            &prior(&[("copper", 50), ("zinc", i64::MIN), ("bismuth", 20)]),
        );
        assert!(matches!(outcome, Outcome::Invalid(_)));
    }

    #[test]
    fn empty_alloy_computes_nothing() {
        let alloy = Alloy::new("empty", vec![]);
        assert_eq!(recompute(&alloy, 100.0, None, &HashMap::new()), Outcome::NoComputation);
    }

    #[test]
    fn two_components_derive_the_second_on_global_update() {
        let outcome = recompute(&tin_bronze(), 100.0, None, &prior(&[("copper", 90), ("tin", 3)]));
        let Outcome::Balanced(b) = &outcome else {
            panic!("expected balanced, got {outcome:?}");
        };
        assert_eq!(b.nuggets("copper"), Some(90));
        assert_eq!(b.nuggets("tin"), Some(10));
        assert_eq!(b.share("tin").unwrap().percent, 10.0);
    }

    #[test]
    fn two_components_derive_the_first_when_second_is_edited() {
        let outcome = recompute(
            &tin_bronze(),
            100.0,
            Some("tin"),
            &prior(&[("copper", 50), ("tin", 12)]),
        );
        let Outcome::Balanced(b) = &outcome else {
            panic!("expected balanced, got {outcome:?}");
        };
        assert_eq!(b.nuggets("copper"), Some(88));
        assert_eq!(b.nuggets("tin"), Some(12));
    }

    #[test]
    fn two_components_report_every_violation() {
        let alloy = Alloy::new(
            "ab",
            vec![Component::new("a", 60.0, 80.0), Component::new("b", 20.0, 40.0)],
        );
        let outcome = recompute(&alloy, 100.0, None, &prior(&[("a", 100)]));
        let Outcome::Invalid(inv) = &outcome else {
            panic!("expected invalid, got {outcome:?}");
        };
        assert_eq!(inv.nuggets("a"), Some(100));
        assert_eq!(inv.nuggets("b"), Some(0));
        assert!(inv.is_flagged("a"));
        assert!(inv.is_flagged("b"));

        let headline = inv.headline().unwrap();
        assert_eq!(headline.metal_id, "b");
        assert_eq!(
            headline.kind,
            ViolationKind::OutOfRange { percent: 0.0, min: 20.0, max: 40.0 }
        );
    }

    #[test]
    fn missing_prior_value_is_not_a_number() {
        let outcome = recompute(&tin_bronze(), 100.0, None, &HashMap::new());
        let Outcome::Invalid(inv) = &outcome else {
            panic!("expected invalid, got {outcome:?}");
        };
        assert_eq!(inv.violations.len(), 2);
        assert!(inv.violations.iter().all(|v| v.kind == ViolationKind::NotANumber));
        assert!(outcome.values().is_empty());
    }

    #[test]
    fn global_update_spreads_by_midpoint() {
        let outcome = recompute(&bismuth_bronze(), 1000.0, None, &HashMap::new());
        let Outcome::Balanced(b) = &outcome else {
            panic!("expected balanced, got {outcome:?}");
        };
        assert_eq!(b.nuggets("copper"), Some(500));
        assert_eq!(b.nuggets("zinc"), Some(300));
        assert_eq!(b.nuggets("bismuth"), Some(200));
    }

    #[test]
    fn global_update_ignores_prior_values() {
        let alloy = bismuth_bronze();
        let a = recompute(&alloy, 1000.0, None, &HashMap::new());
        let b = recompute(&alloy, 1000.0, None, &prior(&[("copper", 1), ("zinc", 2)]));
        assert_eq!(a, b);
    }

    #[test]
    fn last_component_absorbs_rounding() {
        let alloy = Alloy::new(
            "thirds",
            vec![
                Component::new("a", 30.0, 36.0),
                Component::new("b", 30.0, 36.0),
                Component::new("c", 30.0, 36.0),
            ],
        );
        let values = recompute(&alloy, 100.0, None, &HashMap::new()).values();
        assert_eq!(values["a"], 33);
        assert_eq!(values["b"], 33);
        assert_eq!(values["c"], 34);
    }

    #[test]
    fn zero_weights_put_everything_on_the_last_component() {
        let alloy = Alloy::new(
            "zeros",
            vec![
                Component::new("a", 0.0, 0.0),
                Component::new("b", 0.0, 0.0),
                Component::new("c", 0.0, 100.0),
            ],
        );
        let values = recompute(&alloy, 40.0, None, &HashMap::new()).values();
        assert_eq!(values["a"] + values["b"] + values["c"], 40);

        let zero_others = Alloy::new(
            "zero-others",
            vec![
                Component::new("a", 0.0, 100.0),
                Component::new("b", 0.0, 0.0),
                Component::new("c", 0.0, 0.0),
            ],
        );
        let values = recompute(&zero_others, 50.0, Some("a"), &prior(&[("a", 30)])).values();
        assert_eq!(values["a"], 30);
        assert_eq!(values["b"], 0);
        assert_eq!(values["c"], 20);
    }

    #[test]
    fn targeted_update_holds_the_edited_component() {
        let outcome = recompute(
            &bismuth_bronze(),
            1000.0,
            Some("zinc"),
            &prior(&[("copper", 500), ("zinc", 260), ("bismuth", 200)]),
        );
        let Outcome::Balanced(b) = &outcome else {
            panic!("expected balanced, got {outcome:?}");
        };
        // 740 left, split 50:20
        assert_eq!(b.nuggets("zinc"), Some(260));
        assert_eq!(b.nuggets("copper"), Some(529));
        assert_eq!(b.nuggets("bismuth"), Some(211));
    }

    #[test]
    fn edited_value_above_total_makes_others_negative() {
        let outcome = recompute(&bismuth_bronze(), 100.0, Some("copper"), &prior(&[("copper", 130)]));
        let Outcome::Invalid(inv) = &outcome else {
            panic!("expected invalid, got {outcome:?}");
        };
        assert_eq!(inv.nuggets("zinc"), Some(-18));
        assert_eq!(inv.nuggets("bismuth"), Some(-12));
        assert!(matches!(
            inv.violations[0].kind,
            ViolationKind::OutOfRange { .. }
        ));
        assert_eq!(inv.violations[1].kind, ViolationKind::Negative { nuggets: -18 });
        assert_eq!(inv.headline().unwrap().kind, ViolationKind::Negative { nuggets: -12 });
    }

    #[test]
    fn held_component_without_value_poisons_the_others() {
        let outcome = recompute(&bismuth_bronze(), 100.0, Some("zinc"), &HashMap::new());
        let Outcome::Invalid(inv) = &outcome else {
            panic!("expected invalid, got {outcome:?}");
        };
        assert_eq!(inv.violations.len(), 3);
        assert!(inv.values.iter().all(|(_, n)| n.is_none()));
    }

    #[test]
    fn unknown_edit_is_a_global_update() {
        let alloy = bismuth_bronze();
        assert_eq!(
            recompute(&alloy, 1000.0, Some("gold"), &HashMap::new()),
            recompute(&alloy, 1000.0, None, &HashMap::new())
        );
    }

    #[test]
    fn fractional_totals_are_rounded() {
        let outcome = recompute(&tin_bronze(), 100.4, None, &prior(&[("copper", 90)]));
        let Outcome::Balanced(b) = &outcome else {
            panic!("expected balanced, got {outcome:?}");
        };
        assert_eq!(b.total, 100);
        assert_eq!(b.nuggets("tin"), Some(10));
    }

    #[test]
    fn single_component_takes_the_whole_total() {
        let alloy = Alloy::new("pure", vec![Component::new("copper", 100.0, 100.0)]);
        let outcome = recompute(&alloy, 25.0, Some("copper"), &prior(&[("copper", 3)]));
        assert_eq!(outcome.values()["copper"], 25);
        assert!(outcome.is_balanced());
    }

    #[test]
    fn bounds_round_inwards() {
        let all = bounds(&tin_bronze(), 55.0).unwrap();
        assert_eq!(all[0].min_nuggets, 49); // 48.4
        assert_eq!(all[0].max_nuggets, 50); // 50.6
        assert_eq!(all[1].min_nuggets, 5); // 4.4
        assert_eq!(all[1].max_nuggets, 6); // 6.6
    }

    #[test]
    fn clamp_prefers_lower_bound_when_crossed() {
        let crossed = ComponentBounds {
            metal_id: "x".into(),
            min_nuggets: 3,
            max_nuggets: 2,
        };
        assert_eq!(crossed.clamp(10), 3);
        assert_eq!(crossed.clamp(0), 3);
    }

    #[test]
    fn reconcile_resets_only_out_of_bounds_values() {
        let alloy = bismuth_bronze();
        let values = reconcile(&alloy, 1000.0, &prior(&[("copper", 460), ("zinc", 900)]));
        assert_eq!(values["copper"], 460);
        assert_eq!(values["zinc"], 300);
        assert_eq!(values["bismuth"], 200);
    }

    #[test]
    fn reconcile_leaves_values_alone_without_a_total() {
        let values = prior(&[("copper", 7)]);
        assert_eq!(reconcile(&tin_bronze(), -1.0, &values), values);
    }
}
