//! Weekly stress aggregation.
//!
//! For each week the highest score across the temperature stress types and
//! drought becomes the week's risk value, and every stress type reaching it
//! is reported as a label. Drought is evaluated first, so it leads the
//! labels when it ties.

use log::debug;

use crate::{
    error::{Result, StressError},
    payload::{DroughtPayload, StressTypeScore, TempStressPayload},
    stress_type::LABEL_ORDER,
    StressType, WeekKey, WeeklyRisk,
};

/// Aggregate every week of `temp_stress`, in the order the service emitted them.
///
/// Weeks present only in `drought` are ignored. Fails with
/// [`StressError::MalformedInput`] when `temp_stress` is empty or any week
/// record has no scores.
pub fn aggregate(
    temp_stress: &TempStressPayload,
    drought: &DroughtPayload,
    label_order: &[StressType],
) -> Result<Vec<WeeklyRisk>> {
    if temp_stress.is_empty() {
        return Err(StressError::malformed("temperature stress payload has no weeks"));
    }
    let weeks = temp_stress
        .iter()
        .map(|(week, scores)| aggregate_week(week, scores, drought.score(week), label_order))
        .collect::<Result<Vec<WeeklyRisk>>>()?;
    debug!("Aggregated {} weeks", weeks.len());
    Ok(weeks)
}

/// Aggregate the weeks named in `weeks`, in that order.
///
/// Every listed week must be present in `temp_stress`.
pub fn aggregate_in_order(
    weeks: &[WeekKey],
    temp_stress: &TempStressPayload,
    drought: &DroughtPayload,
    label_order: &[StressType],
) -> Result<Vec<WeeklyRisk>> {
    if weeks.is_empty() {
        return Err(StressError::malformed("no weeks to aggregate"));
    }
    weeks
        .iter()
        .map(|week| {
            let scores = temp_stress.get(week).ok_or_else(|| {
                StressError::malformed(format!("week `{week}` missing from temperature stress"))
            })?;
            aggregate_week(week, scores, drought.score(week), label_order)
        })
        .collect()
}

/// [`aggregate`] with the service's label order.
pub fn aggregate_default(
    temp_stress: &TempStressPayload,
    drought: &DroughtPayload,
) -> Result<Vec<WeeklyRisk>> {
    aggregate(temp_stress, drought, &LABEL_ORDER)
}

fn aggregate_week(
    week: &WeekKey,
    scores: &StressTypeScore,
    drought: u32,
    label_order: &[StressType],
) -> Result<WeeklyRisk> {
    let max_temp = scores
        .max_score()
        .ok_or_else(|| StressError::malformed(format!("week `{week}` has no stress scores")))?;
    let value = max_temp.max(drought);

    let mut labels = Vec::with_capacity(label_order.len() + 1);
    if value != 0 {
        if drought == value {
            labels.push(StressType::Drought);
        }
        labels.extend(
            label_order
                .iter()
                .copied()
                .filter(|stress_type| *stress_type != StressType::Drought)
                .filter(|stress_type| scores.get(*stress_type) == Some(value)),
        );
    }
    Ok(WeeklyRisk { value, labels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StressType::{DiurnalHeat, Drought, Frost, NightimeHeat};

    fn week(diurnal: u32, frost: u32, nightime: u32) -> StressTypeScore {
        [(DiurnalHeat, diurnal), (Frost, frost), (NightimeHeat, nightime)]
            .into_iter()
            .collect()
    }

    fn temp(weeks: Vec<(&str, StressTypeScore)>) -> TempStressPayload {
        weeks
            .into_iter()
            .map(|(key, scores)| (WeekKey::from(key), scores))
            .collect()
    }

    fn drought(weeks: &[(&str, u32)]) -> DroughtPayload {
        weeks.iter().map(|(key, score)| (WeekKey::from(*key), *score)).collect()
    }

    #[test]
    fn test_ties_between_temperature_types() {
        let result = aggregate_default(&temp(vec![("w0", week(5, 2, 5))]), &drought(&[("w0", 3)])).unwrap();
        assert_eq!(
            result,
            vec![WeeklyRisk {
                value: 5,
                labels: vec![DiurnalHeat, NightimeHeat]
            }]
        );
    }

    #[test]
    fn test_zero_risk_has_no_labels() {
        let result = aggregate_default(&temp(vec![("w0", week(0, 0, 0))]), &drought(&[("w0", 0)])).unwrap();
        assert_eq!(result, vec![WeeklyRisk { value: 0, labels: vec![] }]);
    }

    #[test]
    fn test_drought_tie_is_listed_first() {
        let result = aggregate_default(&temp(vec![("w0", week(4, 2, 1))]), &drought(&[("w0", 4)])).unwrap();
        assert_eq!(result[0].value, 4);
        assert_eq!(result[0].labels, vec![Drought, DiurnalHeat]);
    }

    #[test]
    fn test_drought_above_temperature() {
        let result = aggregate_default(&temp(vec![("w0", week(1, 2, 1))]), &drought(&[("w0", 8)])).unwrap();
        assert_eq!(result[0], WeeklyRisk { value: 8, labels: vec![Drought] });
    }

    #[test]
    fn test_drought_only_weeks_are_ignored() {
        let result = aggregate_default(
            &temp(vec![("w0", week(3, 0, 0))]),
            &drought(&[("w0", 1), ("w1", 9)]),
        )
        .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0], WeeklyRisk { value: 3, labels: vec![DiurnalHeat] });
    }

    #[test]
    fn test_missing_drought_week_scores_zero() {
        let result = aggregate_default(&temp(vec![("w0", week(0, 6, 0))]), &drought(&[])).unwrap();
        assert_eq!(result[0], WeeklyRisk { value: 6, labels: vec![Frost] });
    }

    #[test]
    fn test_empty_week_record_is_malformed() {
        let err = aggregate_default(
            &temp(vec![("w0", week(1, 1, 1)), ("w1", StressTypeScore::new())]),
            &drought(&[]),
        )
        .unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_drought_entry_in_temperature_record_is_not_counted() {
        let mut scores = week(1, 0, 0);
        scores.insert(Drought, 9);
        let result = aggregate_default(&temp(vec![("w0", scores)]), &drought(&[("w0", 0)])).unwrap();
        assert_eq!(result[0], WeeklyRisk { value: 1, labels: vec![DiurnalHeat] });

        let drought_only: StressTypeScore = [(Drought, 9)].into_iter().collect();
        assert!(aggregate_default(&temp(vec![("w0", drought_only)]), &drought(&[]))
            .unwrap_err()
            .is_malformed());
    }

    #[test]
    fn test_empty_payload_is_malformed() {
        let err = aggregate_default(&TempStressPayload::default(), &drought(&[("w0", 2)])).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_output_follows_week_order_and_is_repeatable() {
        let temp_stress = temp(vec![
            ("w2", week(1, 0, 0)),
            ("w0", week(0, 7, 7)),
            ("w1", week(2, 2, 2)),
        ]);
        let drought = drought(&[("w0", 7), ("w1", 2), ("w2", 0)]);
        let first = aggregate_default(&temp_stress, &drought).unwrap();
        let second = aggregate_default(&temp_stress, &drought).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert_eq!(first[0], WeeklyRisk { value: 1, labels: vec![DiurnalHeat] });
        assert_eq!(first[1].labels, vec![Drought, Frost, NightimeHeat]);
        assert_eq!(first[2].labels, vec![Drought, DiurnalHeat, Frost, NightimeHeat]);
        for risk in &first {
            assert!(risk.labels.len() <= LABEL_ORDER.len() + 1);
        }
    }

    #[test]
    fn test_label_order_is_respected() {
        let order = [NightimeHeat, Drought, DiurnalHeat];
        let result = aggregate(&temp(vec![("w0", week(5, 5, 5))]), &drought(&[]), &order).unwrap();
        // Frost is not in the order so it is never labelled; Drought in the order is skipped.
        assert_eq!(result[0].labels, vec![NightimeHeat, DiurnalHeat]);
    }

    #[test]
    fn test_aggregate_in_order() {
        let temp_stress = temp(vec![("a", week(1, 0, 0)), ("b", week(0, 2, 0))]);
        let drought = drought(&[]);
        let order = [WeekKey::from("b"), WeekKey::from("a")];
        let result = aggregate_in_order(&order, &temp_stress, &drought, &LABEL_ORDER).unwrap();
        assert_eq!(result[0].labels, vec![Frost]);
        assert_eq!(result[1].labels, vec![DiurnalHeat]);

        let missing = [WeekKey::from("c")];
        assert!(aggregate_in_order(&missing, &temp_stress, &drought, &LABEL_ORDER)
            .unwrap_err()
            .is_malformed());
    }
}
