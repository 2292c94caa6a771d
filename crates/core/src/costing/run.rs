//! Run quantity expansion from machine parameters.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The production stage a bill of materials belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionStage {
    /// Injection moulding: quantities derive from machine parameters.
    Injection,
    /// Blow moulding: quantities are taken as planned.
    Blowing,
}

/// Machine parameters for one injection operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationParams {
    /// Seconds per moulding round.
    pub cycle_time_seconds: Decimal,
    /// Units produced per round.
    pub cavities_per_round: Decimal,
    /// Hours the machine runs.
    pub running_hours: Decimal,
    /// Expected scrap as a percentage of gross (e.g. 3 for 3%).
    pub scrap_percent: Decimal,
}

/// Gross/good/defective quantities for a production run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunQuantities {
    /// Total units produced, scrap included.
    pub gross: Decimal,
    /// Saleable units.
    pub good: Decimal,
    /// Scrapped units.
    pub defective: Decimal,
}

impl RunQuantities {
    fn add(self, other: Self) -> Self {
        Self {
            gross: self.gross + other.gross,
            good: self.good + other.good,
            defective: self.defective + other.defective,
        }
    }
}

const SECONDS_PER_HOUR: Decimal = Decimal::from_parts(3600, 0, 0, false, 0);
const PERCENT: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Expands operations into run quantities for a stage.
///
/// Injection sums per-operation output:
/// `rounds_per_hour = 3600 / cycle` (0 when the cycle is 0),
/// `gross = rounds_per_hour * hours * cavities`,
/// `defective = gross * scrap% / 100`, `good = gross - defective`.
///
/// Blowing takes the planned quantity as both gross and good.
#[must_use]
pub fn expand_run(
    stage: ProductionStage,
    operations: &[OperationParams],
    planned_quantity: Decimal,
) -> RunQuantities {
    match stage {
        ProductionStage::Injection => operations
            .iter()
            .map(expand_operation)
            .fold(RunQuantities::default(), RunQuantities::add),
        ProductionStage::Blowing => RunQuantities {
            gross: planned_quantity,
            good: planned_quantity,
            defective: Decimal::ZERO,
        },
    }
}

fn expand_operation(op: &OperationParams) -> RunQuantities {
    let rounds_per_hour = if op.cycle_time_seconds > Decimal::ZERO {
        SECONDS_PER_HOUR / op.cycle_time_seconds
    } else {
        Decimal::ZERO
    };
    let gross = rounds_per_hour * op.running_hours * op.cavities_per_round;
    let defective = gross * op.scrap_percent / PERCENT;
    RunQuantities {
        gross,
        good: gross - defective,
        defective,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    // 30s cycle, 32 cavities, 8h: 120 rounds/h, gross 30720.
    #[case(dec!(30), dec!(32), dec!(8), dec!(3), dec!(30720), dec!(921.60))]
    // 45s cycle, 16 cavities, 10h: 80 rounds/h, gross 12800, no scrap.
    #[case(dec!(45), dec!(16), dec!(10), dec!(0), dec!(12800), dec!(0))]
    // 60s cycle, 1 cavity, 1h at 50% scrap.
    #[case(dec!(60), dec!(1), dec!(1), dec!(50), dec!(60), dec!(30))]
    fn test_injection_single_operation(
        #[case] cycle: Decimal,
        #[case] cavities: Decimal,
        #[case] hours: Decimal,
        #[case] scrap: Decimal,
        #[case] gross: Decimal,
        #[case] defective: Decimal,
    ) {
        let ops = vec![OperationParams {
            cycle_time_seconds: cycle,
            cavities_per_round: cavities,
            running_hours: hours,
            scrap_percent: scrap,
        }];

        let run = expand_run(ProductionStage::Injection, &ops, dec!(0));
        assert_eq!(run.gross, gross);
        assert_eq!(run.defective, defective);
        assert_eq!(run.good, gross - defective);
    }

    #[test]
    fn test_injection_sums_operations() {
        let op = OperationParams {
            cycle_time_seconds: dec!(30),
            cavities_per_round: dec!(32),
            running_hours: dec!(8),
            scrap_percent: dec!(3),
        };
        let single = expand_run(ProductionStage::Injection, &[op], dec!(0));
        let double = expand_run(ProductionStage::Injection, &[op, op], dec!(0));

        assert_eq!(double.gross, single.gross * dec!(2));
        assert_eq!(double.good, single.good * dec!(2));
        assert_eq!(double.defective, single.defective * dec!(2));
    }

    #[test]
    fn test_zero_cycle_produces_nothing() {
        let ops = vec![OperationParams {
            cycle_time_seconds: dec!(0),
            cavities_per_round: dec!(32),
            running_hours: dec!(8),
            scrap_percent: dec!(3),
        }];

        let run = expand_run(ProductionStage::Injection, &ops, dec!(0));
        assert_eq!(run.gross, Decimal::ZERO);
        assert_eq!(run.good, Decimal::ZERO);
        assert_eq!(run.defective, Decimal::ZERO);
    }

    #[test]
    fn test_blowing_uses_planned_quantity() {
        let run = expand_run(ProductionStage::Blowing, &[], dec!(5000));
        assert_eq!(run.gross, dec!(5000));
        assert_eq!(run.good, dec!(5000));
        assert_eq!(run.defective, Decimal::ZERO);
    }

    #[test]
    fn test_gross_equals_good_plus_defective() {
        let ops = vec![OperationParams {
            cycle_time_seconds: dec!(45),
            cavities_per_round: dec!(16),
            running_hours: dec!(10.5),
            scrap_percent: dec!(2.5),
        }];

        let run = expand_run(ProductionStage::Injection, &ops, dec!(0));
        assert_eq!(run.gross, run.good + run.defective);
    }
}
