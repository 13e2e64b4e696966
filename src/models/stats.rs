use serde::Serialize;

use crate::models::clients::Client;

/// Sum of all sale values for one calendar-day grouping key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySalesStats {
    pub data: String,
    pub total: f64,
}

/// The three independent top-client rankings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopClientsStats {
    pub maior_volume: VolumeRanking,
    pub maior_media: MediaRanking,
    pub maior_frequencia: FrequenciaRanking,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeRanking {
    pub cliente: Client,
    pub total_vendas: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRanking {
    pub cliente: Client,
    pub media_valor: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequenciaRanking {
    pub cliente: Client,
    pub dias_unicos: i64,
}
