/// Arithmetic mean of the first `period` values
pub fn calculate_sma(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period {
        return None;
    }

    let sum: f64 = prices[..period].iter().sum();
    Some(sum / period as f64)
}

/// Exponential Moving Average over the full slice.
///
/// Seeded with the SMA of the first `period` values, then smoothed over
/// every subsequent value with `k = 2 / (period + 1)`:
/// `ema = price * k + ema_prev * (1 - k)`.
pub fn calculate_ema(prices: &[f64], period: usize) -> Option<f64> {
    let k = 2.0 / (period as f64 + 1.0);

    let mut ema = calculate_sma(prices, period)?;
    for price in &prices[period..] {
        ema = price * k + ema * (1.0 - k);
    }

    Some(ema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let prices = vec![100.0, 102.0, 104.0, 106.0, 108.0];
        assert_eq!(calculate_sma(&prices, 5), Some(104.0));
    }

    #[test]
    fn test_sma_insufficient_data() {
        let prices = vec![100.0, 102.0];
        assert!(calculate_sma(&prices, 5).is_none());
    }

    #[test]
    fn test_zero_period_yields_none() {
        let prices = vec![100.0, 102.0];
        assert!(calculate_sma(&prices, 0).is_none());
        assert!(calculate_ema(&prices, 0).is_none());
    }

    #[test]
    fn test_ema_insufficient_data() {
        let prices = vec![100.0, 102.0];
        assert!(calculate_ema(&prices, 5).is_none());
    }

    #[test]
    fn test_ema_tracks_rising_prices_above_seed() {
        let prices = vec![100.0, 102.0, 104.0, 106.0, 108.0, 110.0];
        let ema = calculate_ema(&prices, 5).unwrap();
        // Seed SMA is 104; the final value must have moved toward 110.
        assert!(ema > 104.0);
        assert!(ema < 110.0);
    }

    #[test]
    fn test_ema_known_value() {
        // Seed = mean(1,2,3) = 2; k = 0.5
        // 4 -> 4*0.5 + 2*0.5 = 3; 5 -> 5*0.5 + 3*0.5 = 4
        let prices = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let ema = calculate_ema(&prices, 3).unwrap();
        assert!((ema - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_ema_constant_series_converges_to_constant() {
        let prices = vec![42.0; 250];
        let fast = calculate_ema(&prices, 20).unwrap();
        let slow = calculate_ema(&prices, 200).unwrap();
        assert!((fast - 42.0).abs() < 1e-12);
        assert!((slow - 42.0).abs() < 1e-12);
    }

    #[test]
    fn test_fast_ema_reacts_more_than_slow() {
        // Flat then a jump: the shorter period must sit closer to the jump.
        let mut prices = vec![100.0; 30];
        prices.push(120.0);
        let fast = calculate_ema(&prices, 5).unwrap();
        let slow = calculate_ema(&prices, 20).unwrap();
        assert!(fast > slow);
    }
}
