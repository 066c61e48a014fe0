use listsync::{ItemId, PageItem, Searchable};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub menu_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<i64>,
}

impl PageItem for Menu {
    fn id(&self) -> ItemId {
        ItemId::Number(self.menu_id)
    }
}

impl Searchable for Menu {
    fn search_text(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub store_id: i64,
    /// Some endpoints send `name`, others `storeName`.
    #[serde(default, alias = "storeName")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_rate: Option<f64>,
    #[serde(default, alias = "distance", skip_serializing_if = "Option::is_none")]
    pub distance_meter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_image: Option<String>,
}

impl PageItem for Store {
    fn id(&self) -> ItemId {
        ItemId::Number(self.store_id)
    }
}

impl Searchable for Store {
    fn search_text(&self) -> String {
        self.name.clone()
    }
}

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuSort {
    #[default]
    Discount,
    PriceAsc,
    PriceDesc,
}

impl MenuSort {
    /// The sort button cycles discount → cheapest → priciest → discount.
    pub fn next(self) -> Self {
        match self {
            MenuSort::Discount => MenuSort::PriceAsc,
            MenuSort::PriceAsc => MenuSort::PriceDesc,
            MenuSort::PriceDesc => MenuSort::Discount,
        }
    }

    /// Value of the `menuSortType` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            MenuSort::Discount => "DISCOUNT",
            MenuSort::PriceAsc => "PRICE_ASC",
            MenuSort::PriceDesc => "PRICE_DESC",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuSort::Discount => "할인순",
            MenuSort::PriceAsc => "가격 ⬇️",
            MenuSort::PriceDesc => "가격 ⬆️",
        }
    }
}

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreSort {
    #[default]
    Distance,
    Review,
    CreatedAt,
}

impl StoreSort {
    pub fn next(self) -> Self {
        match self {
            StoreSort::Distance => StoreSort::Review,
            StoreSort::Review => StoreSort::CreatedAt,
            StoreSort::CreatedAt => StoreSort::Distance,
        }
    }

    /// Value of the `type` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            StoreSort::Distance => "DISTANCE",
            StoreSort::Review => "REVIEW",
            StoreSort::CreatedAt => "CREATED_AT",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StoreSort::Distance => "가까운순",
            StoreSort::Review => "리뷰순",
            StoreSort::CreatedAt => "신규순",
        }
    }
}
