//! Lotto 6/45 history pipeline
//!
//! Provides the remote draw source, the cache-or-rebuild history store,
//! frequency statistics, and the weighted number generator.

pub mod cache;
pub mod generator;
pub mod rate_limiter;
pub mod source;
pub mod stats;
pub mod store;

pub use cache::{FileHistoryCache, HistoryCache, MemoryHistoryCache};
pub use source::{DrawSource, FetchOutcome, HttpDrawSource};
pub use store::{HistoricalDrawStore, ScanPolicy};

/// Smallest drawable number.
pub const LOTTO_MIN: u8 = 1;
/// Largest drawable number.
pub const LOTTO_MAX: u8 = 45;
/// Numbers drawn per round.
pub const LOTTO_PICK: usize = 6;

/// Base URL for the per-round draw endpoint
pub const API_BASE_URL: &str = "https://www.dhlottery.co.kr/common.do?method=getLottoNumber";

/// Build the draw query URL for a round
/// URL: https://www.dhlottery.co.kr/common.do?method=getLottoNumber&drwNo=N
pub fn draw_url(base_url: &str, round: u32) -> String {
    format!("{}&drwNo={}", base_url, round)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_url() {
        let url = draw_url(API_BASE_URL, 1);
        assert_eq!(
            url,
            "https://www.dhlottery.co.kr/common.do?method=getLottoNumber&drwNo=1"
        );
    }

    #[test]
    fn test_draw_url_custom_base() {
        let url = draw_url("http://127.0.0.1:8099/lotto?method=getLottoNumber", 2000);
        assert_eq!(
            url,
            "http://127.0.0.1:8099/lotto?method=getLottoNumber&drwNo=2000"
        );
    }
}
