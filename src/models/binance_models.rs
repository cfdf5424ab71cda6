use serde::{ Deserialize, Serialize };

/// Snapshot of an orderbook from Binance REST API
#[derive(Debug, Deserialize)]
pub struct BinanceOrderbookSnapshot {
    #[serde(rename = "lastUpdateId")]
    pub last_update_id: u64,

    pub bids: Vec<[String; 2]>,
    pub asks: Vec<[String; 2]>,
}

/// Body of a P2P advertisement search
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct P2PSearchRequest<'a> {
    pub asset: &'a str,
    pub countries: Vec<String>,
    pub fiat: &'a str,
    pub page: u32,
    pub pay_types: Vec<&'a str>,
    pub pro_merchant_ads: bool,
    pub publisher_type: Option<String>,
    pub rows: usize,
    pub trade_type: &'a str,
    pub trans_amount: u64,
}

/// Response of a P2P advertisement search
#[derive(Debug, Deserialize)]
pub struct P2PSearchResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// `null` when the search matched nothing
    #[serde(default)]
    pub data: Option<Vec<P2PAdvertisementEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct P2PAdvertisementEntry {
    pub adv: P2PAdvertisement,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct P2PAdvertisement {
    pub price: String,
    #[serde(default)]
    pub asset: Option<String>,
    #[serde(default)]
    pub fiat_unit: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_depth_snapshot() {
        let raw =
            r#"{"lastUpdateId":1027024,"bids":[["4.00000000","431.00000000"]],"asks":[["4.00000200","12.00000000"]]}"#;
        let snapshot: BinanceOrderbookSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snapshot.last_update_id, 1027024);
        assert_eq!(snapshot.bids[0][0], "4.00000000");
        assert_eq!(snapshot.asks[0][0], "4.00000200");
    }

    #[test]
    fn test_parse_p2p_response() {
        let raw =
            r#"{"code":"000000","message":null,"data":[{"adv":{"price":"92.15","asset":"USDT","fiatUnit":"RUB","tradeType":"BUY"},"advertiser":{"nickName":"x"}}],"total":1,"success":true}"#;
        let response: P2PSearchResponse = serde_json::from_str(raw).unwrap();
        let data = response.data.unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].adv.price, "92.15");
        assert_eq!(data[0].adv.fiat_unit.as_deref(), Some("RUB"));
    }

    #[test]
    fn test_parse_empty_p2p_response() {
        let raw = r#"{"code":"000000","message":null,"data":null,"total":0,"success":true}"#;
        let response: P2PSearchResponse = serde_json::from_str(raw).unwrap();
        assert!(response.data.is_none());
    }

    #[test]
    fn test_search_request_field_names() {
        let request = P2PSearchRequest {
            asset: "USDT",
            countries: vec![],
            fiat: "RUB",
            page: 1,
            pay_types: vec!["TinkoffNew"],
            pro_merchant_ads: false,
            publisher_type: None,
            rows: 10,
            trade_type: "BUY",
            trans_amount: 2000,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["payTypes"][0], "TinkoffNew");
        assert_eq!(value["tradeType"], "BUY");
        assert_eq!(value["transAmount"], 2000);
        assert!(value["publisherType"].is_null());
    }
}
