/// combined pollution score: the plain arithmetic mean of predicted PM2.5,
/// PM10 and NO2, with no weighting or normalization between pollutants.
pub fn pollution_index(predicted_pm25: f64, pm10: f64, no2: f64) -> f64 {
    (predicted_pm25 + pm10 + no2) / 3.0
}

#[cfg(test)]
mod tests {
    use super::pollution_index;

    #[test]
    fn test_pollution_index_is_unweighted_mean() {
        assert_eq!(pollution_index(10.0, 20.0, 30.0), 20.0);
        assert_eq!(pollution_index(0.0, 0.0, 0.0), 0.0);
        assert_eq!(pollution_index(30.0, 40.0, 25.0), 95.0 / 3.0);
    }

    #[test]
    fn test_pollution_index_keeps_negative_predictions() {
        assert_eq!(pollution_index(-6.0, 3.0, 0.0), -1.0);
    }
}
