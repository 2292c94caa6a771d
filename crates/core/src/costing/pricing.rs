//! Material cost pricing for a production run.

use ledgermill_shared::types::ItemId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::valuation::Valuation;

/// A bill-of-materials component requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRequirement {
    /// The raw material or semi-finished item consumed.
    pub item_id: ItemId,
    /// Quantity consumed per one GROSS output unit.
    pub quantity_required: Decimal,
}

/// The priced consumption of one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentCost {
    /// The component item.
    pub item_id: ItemId,
    /// Total quantity consumed by the run (gross * quantity_required).
    pub consumption: Decimal,
    /// Average unit cost used for pricing.
    pub unit_cost: Decimal,
    /// consumption * unit_cost.
    pub cost: Decimal,
    /// Consumption exceeds quantity on hand (advisory).
    pub shortage: bool,
    /// The item has no cost history yet (advisory).
    pub no_cost: bool,
}

/// The priced material cost of a full run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCosting {
    /// Per-component breakdown.
    pub components: Vec<ComponentCost>,
    /// Sum of component costs.
    pub total_material_cost: Decimal,
    /// Total amortized over GOOD units (0 if good is 0).
    pub cost_per_good_unit: Decimal,
}

impl RunCosting {
    /// Returns true if any component is short or unpriced.
    #[must_use]
    pub fn has_advisories(&self) -> bool {
        self.components.iter().any(|c| c.shortage || c.no_cost)
    }
}

/// Prices a run's components against current inventory valuations.
///
/// Consumption is computed on GROSS output; the per-unit cost is amortized
/// over GOOD output, so scrap inflates the unit cost of what survives.
/// Missing valuations price at zero and raise the `no_cost` advisory.
pub fn price_run<F>(
    components: &[ComponentRequirement],
    lookup: F,
    gross: Decimal,
    good: Decimal,
) -> RunCosting
where
    F: Fn(ItemId) -> Option<Valuation>,
{
    let mut priced = Vec::with_capacity(components.len());
    let mut total_material_cost = Decimal::ZERO;

    for component in components {
        let valuation = lookup(component.item_id).unwrap_or_default();
        let consumption = gross * component.quantity_required;
        let cost = consumption * valuation.average_unit_cost;
        total_material_cost += cost;

        priced.push(ComponentCost {
            item_id: component.item_id,
            consumption,
            unit_cost: valuation.average_unit_cost,
            cost,
            shortage: consumption > valuation.quantity_on_hand,
            no_cost: valuation.average_unit_cost.is_zero(),
        });
    }

    let cost_per_good_unit = if good > Decimal::ZERO {
        total_material_cost / good
    } else {
        Decimal::ZERO
    };

    RunCosting {
        components: priced,
        total_material_cost,
        cost_per_good_unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn valuations(entries: &[(ItemId, Decimal, Decimal)]) -> HashMap<ItemId, Valuation> {
        entries
            .iter()
            .map(|&(id, quantity_on_hand, average_unit_cost)| {
                (
                    id,
                    Valuation {
                        quantity_on_hand,
                        average_unit_cost,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_prices_on_gross_amortizes_over_good() {
        let resin = ItemId::new();
        let stock = valuations(&[(resin, dec!(10000), dec!(2.50))]);
        let components = vec![ComponentRequirement {
            item_id: resin,
            quantity_required: dec!(0.04),
        }];

        // gross 1000, good 970: consumption 40, cost 100, per-good 100/970.
        let costing = price_run(&components, |id| stock.get(&id).copied(), dec!(1000), dec!(970));

        assert_eq!(costing.components[0].consumption, dec!(40.00));
        assert_eq!(costing.total_material_cost, dec!(100.0000));
        assert_eq!(costing.cost_per_good_unit, dec!(100.0000) / dec!(970));
        assert!(!costing.has_advisories());
    }

    #[test]
    fn test_shortage_is_advisory_not_error() {
        let resin = ItemId::new();
        let stock = valuations(&[(resin, dec!(10), dec!(2.00))]);
        let components = vec![ComponentRequirement {
            item_id: resin,
            quantity_required: dec!(1),
        }];

        let costing = price_run(&components, |id| stock.get(&id).copied(), dec!(50), dec!(50));

        assert!(costing.components[0].shortage);
        assert_eq!(costing.components[0].cost, dec!(100.00));
        assert!(costing.has_advisories());
    }

    #[test]
    fn test_unpriced_item_flags_no_cost() {
        let unknown = ItemId::new();
        let components = vec![ComponentRequirement {
            item_id: unknown,
            quantity_required: dec!(2),
        }];

        let costing = price_run(&components, |_| None, dec!(100), dec!(95));

        assert!(costing.components[0].no_cost);
        assert!(costing.components[0].shortage);
        assert_eq!(costing.total_material_cost, Decimal::ZERO);
        assert_eq!(costing.cost_per_good_unit, Decimal::ZERO);
    }

    #[test]
    fn test_zero_good_output_has_zero_unit_cost() {
        let resin = ItemId::new();
        let stock = valuations(&[(resin, dec!(100), dec!(3.00))]);
        let components = vec![ComponentRequirement {
            item_id: resin,
            quantity_required: dec!(1),
        }];

        let costing = price_run(&components, |id| stock.get(&id).copied(), dec!(10), dec!(0));

        assert_eq!(costing.total_material_cost, dec!(30.00));
        assert_eq!(costing.cost_per_good_unit, Decimal::ZERO);
    }

    #[test]
    fn test_multi_component_total() {
        let resin = ItemId::new();
        let colorant = ItemId::new();
        let stock = valuations(&[
            (resin, dec!(1000), dec!(2.00)),
            (colorant, dec!(50), dec!(10.00)),
        ]);
        let components = vec![
            ComponentRequirement {
                item_id: resin,
                quantity_required: dec!(0.5),
            },
            ComponentRequirement {
                item_id: colorant,
                quantity_required: dec!(0.01),
            },
        ];

        // gross 100: resin 50 @ 2 = 100; colorant 1 @ 10 = 10.
        let costing = price_run(&components, |id| stock.get(&id).copied(), dec!(100), dec!(100));

        assert_eq!(costing.total_material_cost, dec!(110.0000));
        assert_eq!(costing.cost_per_good_unit, dec!(110.0000) / dec!(100));
    }
}
