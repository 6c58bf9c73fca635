use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, ToSchema)]
#[sqlx(type_name = "currency_code", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Usd,
    Xof,
    Mad,
    Tnd,
    Gbp,
    Chf,
    Cad,
}

impl Default for Currency {
    fn default() -> Self {
        Self::Xof
    }
}

impl Currency {
    pub const ALL: [Currency; 8] = [
        Currency::Eur,
        Currency::Usd,
        Currency::Xof,
        Currency::Mad,
        Currency::Tnd,
        Currency::Gbp,
        Currency::Chf,
        Currency::Cad,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Xof => "XOF",
            Currency::Mad => "MAD",
            Currency::Tnd => "TND",
            Currency::Gbp => "GBP",
            Currency::Chf => "CHF",
            Currency::Cad => "CAD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
            Currency::Xof => "CFA",
            Currency::Mad => "DH",
            Currency::Tnd => "DT",
            Currency::Gbp => "£",
            Currency::Chf => "CHF",
            Currency::Cad => "C$",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Eur => "Euro",
            Currency::Usd => "US Dollar",
            Currency::Xof => "CFA Franc",
            Currency::Mad => "Moroccan Dirham",
            Currency::Tnd => "Tunisian Dinar",
            Currency::Gbp => "Pound Sterling",
            Currency::Chf => "Swiss Franc",
            Currency::Cad => "Canadian Dollar",
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
}

impl From<Currency> for CurrencyInfo {
    fn from(currency: Currency) -> Self {
        Self {
            code: currency.code(),
            name: currency.name(),
            symbol: currency.symbol(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CurrencyListResponse {
    pub currencies: Vec<CurrencyInfo>,
}
