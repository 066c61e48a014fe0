use listsync::{ItemId, PageItem, Searchable};

/// One entry of the purchase history. Prices come under several names
/// depending on the backend version and are passed through as sent.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[tsify(type = "string | number")]
    pub order_num: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<i64>,
    #[serde(default)]
    pub store_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_rate: Option<f64>,
    #[serde(default)]
    pub menu_summaries: Vec<String>,
    #[serde(default)]
    pub has_review: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_review: Option<MyReview>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct MyReview {
    #[serde(default, alias = "text")]
    pub content: String,
}

impl Order {
    pub fn reviewed(&self) -> bool {
        self.has_review || self.my_review.is_some()
    }
}

impl PageItem for Order {
    fn id(&self) -> ItemId {
        ItemId::Number(self.order_id)
    }
}

impl Searchable for Order {
    fn search_text(&self) -> String {
        let mut text = self.store_name.clone();
        for summary in &self.menu_summaries {
            text.push(' ');
            text.push_str(summary);
        }
        text
    }
}
