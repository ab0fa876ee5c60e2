use super::super::domain::PropertyRecord;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug)]
pub(crate) struct PriceGroup<K> {
    pub(crate) key: K,
    pub(crate) prices: Vec<f64>,
}

/// Buckets prices by key in first-occurrence order; records without a key are skipped.
pub(crate) fn group_prices<K, F>(records: &[PropertyRecord], key_of: F) -> Vec<PriceGroup<K>>
where
    K: Eq + Hash + Clone,
    F: Fn(&PropertyRecord) -> Option<K>,
{
    let mut groups: Vec<PriceGroup<K>> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();

    for record in records {
        let Some(key) = key_of(record) else {
            continue;
        };

        match index.get(&key) {
            Some(&position) => groups[position].prices.push(record.price),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(PriceGroup {
                    key,
                    prices: vec![record.price],
                });
            }
        }
    }

    groups
}
