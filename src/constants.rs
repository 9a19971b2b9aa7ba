pub mod network {
    pub const DEFAULT_BASE_URL: &str = "https://bopenapi.bgwapi.io";
    pub const TIMEOUT_API_REQUEST_MS: u64 = 30_000;
}

pub mod headers {
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const API_KEY: &str = "x-api-key";
    pub const API_TIMESTAMP: &str = "x-api-timestamp";
    pub const API_SIGNATURE: &str = "x-api-signature";
    pub const PARTNER_CODE: &str = "Partner-Code";
}

pub mod env {
    pub const API_KEY: &str = "BGW_API_KEY";
    pub const API_SECRET: &str = "BGW_API_SECRET";
    pub const PARTNER_CODE: &str = "BGW_PARTNER_CODE";
    pub const BASE_URL: &str = "BGW_BASE_URL";
    pub const TIMEOUT_MS: &str = "BGW_TIMEOUT_MS";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
}

/// Public demo credentials published for the ToB API sandbox. They rotate
/// upstream; override through the environment for real use.
pub mod demo {
    pub const API_KEY: &str = "4843D8C3F1E20772C0E634EDACC5C5F9A0E2DC92";
    pub const API_SECRET: &str = "F2ABFDC684BDC6775FD6286B8D06A3AAD30FD587";
    pub const PARTNER_CODE: &str = "bgw_swap_public";
}

pub mod limits {
    pub const ERROR_BODY_CHARS: usize = 500;
    pub const KLINE_MAX_SIZE: u64 = 1_440;
    pub const BATCH_MAX_TOKENS: usize = 100;
    pub const SUGGESTION_LIMIT: usize = 3;
}

pub mod paths {
    pub const SWAP_NAMESPACE: &str = "/swapx/";
    pub const TOKEN_BASE_INFO: &str = "/bgw-pro/market/v3/coin/batchGetBaseInfo";
    pub const KLINE: &str = "/bgw-pro/market/v3/coin/getKline";
    pub const TX_INFO: &str = "/bgw-pro/market/v3/coin/getTxInfo";
    pub const TOP_RANK: &str = "/bgw-pro/market/v3/topRank/detail";
    pub const POOL_LIST: &str = "/bgw-pro/market/v3/poolList";
    pub const SECURITY_AUDIT: &str = "/bgw-pro/market/v3/coin/security/audits";
    pub const SWAP_QUOTE: &str = "/bgw-pro/swapx/pro/quote";
    pub const SWAP_CALLDATA: &str = "/bgw-pro/swapx/pro/swap";
}
