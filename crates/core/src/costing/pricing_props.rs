//! Property-based tests for run expansion and pricing.

use ledgermill_shared::types::ItemId;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::pricing::{price_run, ComponentRequirement};
use super::run::{expand_run, OperationParams, ProductionStage};
use crate::valuation::Valuation;

fn cycle() -> impl Strategy<Value = Decimal> {
    (1i64..=600).prop_map(Decimal::from)
}

fn small_count() -> impl Strategy<Value = Decimal> {
    (1i64..=64).prop_map(Decimal::from)
}

fn hours() -> impl Strategy<Value = Decimal> {
    (1i64..=24).prop_map(Decimal::from)
}

fn scrap() -> impl Strategy<Value = Decimal> {
    (0i64..=2000).prop_map(|basis_points| Decimal::new(basis_points, 2))
}

fn operation() -> impl Strategy<Value = OperationParams> {
    (cycle(), small_count(), hours(), scrap()).prop_map(
        |(cycle_time_seconds, cavities_per_round, running_hours, scrap_percent)| OperationParams {
            cycle_time_seconds,
            cavities_per_round,
            running_hours,
            scrap_percent,
        },
    )
}

proptest! {
    /// Gross always splits exactly into good + defective.
    #[test]
    fn prop_gross_splits_into_good_and_defective(ops in prop::collection::vec(operation(), 1..5)) {
        let run = expand_run(ProductionStage::Injection, &ops, Decimal::ZERO);
        prop_assert_eq!(run.gross, run.good + run.defective);
        prop_assert!(run.defective >= Decimal::ZERO);
        prop_assert!(run.good >= Decimal::ZERO);
    }

    /// Expansion is additive over operations.
    #[test]
    fn prop_expansion_is_additive(
        first in prop::collection::vec(operation(), 1..4),
        second in prop::collection::vec(operation(), 1..4),
    ) {
        let combined: Vec<OperationParams> =
            first.iter().chain(second.iter()).copied().collect();

        let run_first = expand_run(ProductionStage::Injection, &first, Decimal::ZERO);
        let run_second = expand_run(ProductionStage::Injection, &second, Decimal::ZERO);
        let run_combined = expand_run(ProductionStage::Injection, &combined, Decimal::ZERO);

        prop_assert_eq!(run_combined.gross, run_first.gross + run_second.gross);
        prop_assert_eq!(run_combined.good, run_first.good + run_second.good);
        prop_assert_eq!(run_combined.defective, run_first.defective + run_second.defective);
    }

    /// Total material cost is the sum of component costs, and the per-unit
    /// cost times good output recovers the total.
    #[test]
    fn prop_pricing_total_is_component_sum(
        requirements in prop::collection::vec(
            ((1i64..=1000).prop_map(|n| Decimal::new(n, 3)), (1i64..=100_000).prop_map(|c| Decimal::new(c, 2))),
            1..5,
        ),
        gross in (1i64..=10_000).prop_map(Decimal::from),
    ) {
        let mut stock = HashMap::new();
        let components: Vec<ComponentRequirement> = requirements
            .iter()
            .map(|(quantity_required, unit_cost)| {
                let item_id = ItemId::new();
                stock.insert(item_id, Valuation {
                    quantity_on_hand: Decimal::from(1_000_000i64),
                    average_unit_cost: *unit_cost,
                });
                ComponentRequirement { item_id, quantity_required: *quantity_required }
            })
            .collect();

        let costing = price_run(&components, |id| stock.get(&id).copied(), gross, gross);

        let component_sum: Decimal = costing.components.iter().map(|c| c.cost).sum();
        prop_assert_eq!(costing.total_material_cost, component_sum);

        // Division rounds, so multiplying back only recovers the total
        // within a sub-cent tolerance.
        let recovered = costing.cost_per_good_unit * gross;
        let drift = (recovered - costing.total_material_cost).abs();
        prop_assert!(drift < Decimal::new(1, 2));
    }
}
