//! The aggregation engine: daily sales totals and the three top-client
//! rankings, computed in memory over the store's current rows.
//!
//! Sale dates group by exact string equality. Nothing here normalizes or
//! parses them, so `"2024-01-01"` and `"2024-01-01T00:00:00"` are distinct
//! grouping keys. For ISO calendar dates, lexicographic order is
//! chronological order, which is what the descending sort relies on.
//!
//! The three rankings run as three independent scans. Their eligibility
//! rules differ (the average excludes clients with no sales, the other two
//! keep them at zero), so a single grouped pass cannot serve all three.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::Utc;

use crate::models::{
    clients::Client,
    sales::Sale,
    stats::{DailySalesStats, FrequenciaRanking, MediaRanking, TopClientsStats, VolumeRanking},
};

/// Daily totals are capped at the most recent 30 grouping keys.
pub const DAILY_STATS_LIMIT: usize = 30;

/// Sums sale values per calendar day, most recent day first.
pub fn daily_sales_stats(sales: &[Sale]) -> Vec<DailySalesStats> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for sale in sales {
        *totals.entry(sale.data.as_str()).or_insert(0.0) += sale.valor;
    }

    totals
        .iter()
        .rev()
        .take(DAILY_STATS_LIMIT)
        .map(|(data, total)| DailySalesStats {
            data: (*data).to_string(),
            total: *total,
        })
        .collect()
}

/// Computes the three top-client rankings.
///
/// Ties resolve to the client with the lowest id, deterministically. With no
/// clients at all, every slot carries the placeholder client at metric zero;
/// callers never receive an empty slot.
pub fn top_clients_stats(clients: &[Client], sales: &[Sale]) -> TopClientsStats {
    TopClientsStats {
        maior_volume: highest_volume(clients, sales),
        maior_media: highest_average(clients, sales),
        maior_frequencia: highest_frequency(clients, sales),
    }
}

/// Sum of sale values per client; clients without sales score 0 and stay
/// eligible.
fn highest_volume(clients: &[Client], sales: &[Sale]) -> VolumeRanking {
    let mut totals: HashMap<i64, f64> = HashMap::new();
    for sale in sales {
        *totals.entry(sale.client_id).or_insert(0.0) += sale.valor;
    }

    let best = clients
        .iter()
        .map(|client| (client, totals.get(&client.id).copied().unwrap_or(0.0)))
        .fold(None::<(&Client, f64)>, pick_higher);

    match best {
        Some((client, total)) => VolumeRanking {
            cliente: client.clone(),
            total_vendas: total,
        },
        None => VolumeRanking {
            cliente: placeholder_client(),
            total_vendas: 0.0,
        },
    }
}

/// Mean sale value per client, over clients with at least one sale only.
fn highest_average(clients: &[Client], sales: &[Sale]) -> MediaRanking {
    let mut sums: HashMap<i64, (f64, u32)> = HashMap::new();
    for sale in sales {
        let entry = sums.entry(sale.client_id).or_insert((0.0, 0));
        entry.0 += sale.valor;
        entry.1 += 1;
    }

    let best = clients
        .iter()
        .filter_map(|client| {
            sums.get(&client.id)
                .map(|(sum, count)| (client, sum / f64::from(*count)))
        })
        .fold(None::<(&Client, f64)>, pick_higher);

    match best {
        Some((client, media)) => MediaRanking {
            cliente: client.clone(),
            media_valor: media,
        },
        None => MediaRanking {
            cliente: placeholder_client(),
            media_valor: 0.0,
        },
    }
}

/// Count of distinct sale dates per client; repeat purchases on the same day
/// count once. Clients without sales score 0 and stay eligible.
fn highest_frequency(clients: &[Client], sales: &[Sale]) -> FrequenciaRanking {
    let mut days: HashMap<i64, HashSet<&str>> = HashMap::new();
    for sale in sales {
        days.entry(sale.client_id)
            .or_default()
            .insert(sale.data.as_str());
    }

    let distinct_days = |client: &Client| days.get(&client.id).map_or(0, HashSet::len) as i64;

    let best = clients
        .iter()
        .map(|client| (client, distinct_days(client) as f64))
        .fold(None::<(&Client, f64)>, pick_higher);

    match best {
        Some((client, _)) => FrequenciaRanking {
            cliente: client.clone(),
            dias_unicos: distinct_days(client),
        },
        None => FrequenciaRanking {
            cliente: placeholder_client(),
            dias_unicos: 0,
        },
    }
}

/// Keeps the candidate with the strictly higher metric; on an exact tie the
/// lower client id wins.
fn pick_higher<'a>(
    best: Option<(&'a Client, f64)>,
    candidate: (&'a Client, f64),
) -> Option<(&'a Client, f64)> {
    match best {
        None => Some(candidate),
        Some((current, metric)) => {
            let (client, value) = candidate;
            if value > metric || (value == metric && client.id < current.id) {
                Some(candidate)
            } else {
                best
            }
        }
    }
}

/// Fixed "no client" identity used when the client table is empty.
fn placeholder_client() -> Client {
    let now = Utc::now().naive_utc();
    Client {
        id: 0,
        nome: "Nenhum cliente".to_string(),
        email: "n/a".to_string(),
        data_nascimento: "1900-01-01".to_string(),
        created_at: now,
        updated_at: now,
    }
}
