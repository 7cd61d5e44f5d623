//! 補貨預測性質測試

use chrono::NaiveDate;
use proptest::prelude::*;
use replenish_calc::{
    ConstantForecaster, HorizonBuilder, ProjectionEngine, ProjectionRequest, ReorderCalculator,
    ReplenishmentPlanner,
};
use replenish_core::{
    CalendarMonth, ConsumptionHistory, ForecastPoint, ScheduledReceipts, StockPosition,
};
use rust_decimal::Decimal;

fn arb_month() -> impl Strategy<Value = CalendarMonth> {
    (1000i32..=9990, 1u32..=12).prop_map(|(y, m)| CalendarMonth::new(y, m).unwrap())
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

/// 以分為單位產生任意金額（可為負）
fn arb_amount(min_cents: i64, max_cents: i64) -> impl Strategy<Value = Decimal> {
    (min_cents..=max_cents).prop_map(|c| Decimal::new(c, 2))
}

proptest! {
    #[test]
    fn horizon_is_consecutive_and_increasing(reference in arb_month()) {
        let months = HorizonBuilder::default().months_after(reference);

        prop_assert_eq!(months.len(), 6);
        prop_assert_eq!(months[0], reference.succ());
        for pair in months.windows(2) {
            prop_assert!(pair[0] < pair[1]);
            prop_assert_eq!(pair[0].succ(), pair[1]);
        }
    }

    #[test]
    fn encode_then_decode_is_identity(month in arb_month()) {
        let label = month.encode();
        prop_assert_eq!(CalendarMonth::decode(&label).unwrap(), month);
        prop_assert_eq!(CalendarMonth::decode_strict(&label).unwrap(), month);
    }

    #[test]
    fn decode_then_encode_is_identity(
        abbr in prop::sample::select(vec![
            "ENE", "FEB", "MAR", "ABR", "MAY", "JUN", "JUL", "AGO", "SEP", "OCT", "NOV", "DIC",
        ]),
        year in 1000i32..=9999,
    ) {
        let label = format!("{}-{}", abbr, year);
        prop_assert_eq!(CalendarMonth::decode(&label).unwrap().encode(), label);
    }

    #[test]
    fn projected_stock_is_never_negative(
        on_hand in arb_amount(0, 1_000_000),
        units_per_case in arb_amount(1, 10_000),
        demands in prop::collection::vec(arb_amount(-50_000, 500_000), 1..=6),
        receipt_cases in prop::collection::vec(0u32..50, 6),
    ) {
        let start = CalendarMonth::new(2025, 1).unwrap();
        let position = StockPosition::new("SKU-P", on_hand, units_per_case).unwrap();
        let points: Vec<_> = demands
            .iter()
            .enumerate()
            .map(|(i, d)| ForecastPoint::new(start.add_months(i as u32), *d))
            .collect();
        let mut receipts = ScheduledReceipts::new();
        for (i, cases) in receipt_cases.iter().enumerate() {
            receipts.add(start.add_months(i as u32), *cases);
        }

        let records = ProjectionEngine::project(&position, &points, &receipts).unwrap();

        prop_assert_eq!(records.len(), points.len());
        for record in &records {
            prop_assert!(record.projected_stock >= Decimal::ZERO);
            prop_assert!(record.safety_stock >= Decimal::ZERO);
            prop_assert!(record.forecast_consumption >= Decimal::ZERO);
            if record.reorder_cases > 0 {
                prop_assert!(record.below_minimum);
            }
        }
    }

    #[test]
    fn reorder_cases_cover_shortfall(
        on_hand in 0i64..5_000,
        units_per_case in 1i64..=48,
        // 22 的倍數使安全庫存為整數，顯示值與計算值一致
        demand_days in prop::collection::vec(0i64..200, 6),
        receipt_cases in prop::collection::vec(0u32..20, 6),
    ) {
        let start = CalendarMonth::new(2025, 1).unwrap();
        let factor = Decimal::from(units_per_case);
        let position = StockPosition::new("SKU-R", Decimal::from(on_hand), factor).unwrap();
        let points: Vec<_> = demand_days
            .iter()
            .enumerate()
            .map(|(i, d)| ForecastPoint::new(start.add_months(i as u32), Decimal::from(d * 22)))
            .collect();
        let mut receipts = ScheduledReceipts::new();
        for (i, cases) in receipt_cases.iter().enumerate() {
            receipts.add(start.add_months(i as u32), *cases);
        }

        let records = ProjectionEngine::project(&position, &points, &receipts).unwrap();

        for record in &records {
            prop_assert_eq!(
                record.minimum_required_stock,
                record.forecast_consumption + record.safety_stock
            );
            let shortfall = (record.minimum_required_stock - record.projected_stock).max(Decimal::ZERO);
            let expected = (shortfall / factor).ceil();
            prop_assert_eq!(Decimal::from(record.reorder_cases), expected);
            // 建議訂購量足以補足缺口
            prop_assert!(Decimal::from(record.reorder_cases) * factor >= shortfall);
        }
    }

    #[test]
    fn reorder_uses_unrounded_values(
        on_hand in arb_amount(0, 100_000),
        units_per_case in arb_amount(1, 5_000),
        // 千分之一精度，安全庫存多半無法整除
        demand_mills in 0i64..2_000_000,
    ) {
        let demand = Decimal::new(demand_mills, 3);
        let position = StockPosition::new("SKU-U", on_hand, units_per_case).unwrap();
        let point = ForecastPoint::new(CalendarMonth::new(2025, 1).unwrap(), demand);

        let records =
            ProjectionEngine::project(&position, &[point], &ScheduledReceipts::new()).unwrap();
        let record = &records[0];

        let minimum = ReorderCalculator::minimum_required(demand).unwrap();
        let closing = (on_hand - demand).max(Decimal::ZERO);
        let shortfall = ReorderCalculator::shortfall(minimum, closing).unwrap();

        prop_assert_eq!(Decimal::from(record.reorder_cases), (shortfall / units_per_case).ceil());
        prop_assert_eq!(record.below_minimum, closing < minimum);

        // 顯示欄位各自四捨五入，合計可能差 0.01
        let drift = (record.minimum_required_stock
            - (record.forecast_consumption + record.safety_stock))
            .abs();
        prop_assert!(drift <= Decimal::new(1, 2));
    }

    #[test]
    fn malformed_history_still_yields_full_horizon(
        labels in prop::collection::vec("[0-9]{3} [0-9]{4}", 0..8),
    ) {
        let history = ConsumptionHistory::from_labels(
            labels.iter().map(|l| (l.as_str(), Decimal::from(10))),
        );
        prop_assert!(history.is_empty());

        let request = ProjectionRequest::new("SKU-M", Decimal::from(100), Decimal::from(10))
            .with_history(history);
        let run = ReplenishmentPlanner::new(ConstantForecaster::new(Decimal::from(44)))
            .plan(&request, today())
            .unwrap();

        prop_assert_eq!(run.reference_month, CalendarMonth::from_date(today()));
        prop_assert_eq!(run.records.len(), 6);
        prop_assert_eq!(run.records[0].month, CalendarMonth::new(2026, 11).unwrap());
    }
}
