use std::collections::BTreeMap;

use shared::protocol::ArtworkCatalog;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CatalogReport {
    pub total: usize,
    /// Id and the 1-based positions it appears at.
    pub duplicate_ids: Vec<(String, Vec<usize>)>,
    pub missing_image: Vec<usize>,
    pub without_id: Vec<usize>,
}

impl CatalogReport {
    pub fn is_clean(&self) -> bool {
        self.duplicate_ids.is_empty() && self.missing_image.is_empty()
    }
}

pub fn inspect(catalog: &ArtworkCatalog) -> CatalogReport {
    let mut positions: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    let mut report = CatalogReport {
        total: catalog.total_count(),
        ..CatalogReport::default()
    };

    for (offset, record) in catalog.artworks.iter().enumerate() {
        let position = offset + 1;
        match record.url_id() {
            Some(id) => positions
                .entry(id.as_str().to_string())
                .or_default()
                .push(position),
            None => report.without_id.push(position),
        }
        if record.image.trim().is_empty() {
            report.missing_image.push(position);
        }
    }

    report.duplicate_ids = positions
        .into_iter()
        .filter(|(_, at)| at.len() > 1)
        .collect();
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(raw: &str) -> ArtworkCatalog {
        serde_json::from_str(raw).expect("catalog")
    }

    #[test]
    fn clean_catalog_passes() {
        let report = inspect(&catalog(
            r#"{"artworks":[{"id":1,"image":"/a.jpg"},{"id":2,"image":"/b.jpg"}]}"#,
        ));
        assert!(report.is_clean());
        assert_eq!(report.total, 2);
    }

    #[test]
    fn numeric_and_text_ids_collide() {
        let report = inspect(&catalog(
            r#"{"artworks":[{"id":7,"image":"/a.jpg"},{"id":"7","image":"/b.jpg"},{"id":8,"image":""}]}"#,
        ));
        assert_eq!(report.duplicate_ids, vec![("7".to_string(), vec![1, 2])]);
        assert_eq!(report.missing_image, vec![3]);
        assert!(!report.is_clean());
    }

    #[test]
    fn records_without_ids_are_noted_but_allowed() {
        let report = inspect(&catalog(r#"{"artworks":[{"image":"/a.jpg"},{"id":"","image":"/b.jpg"}]}"#));
        assert_eq!(report.without_id, vec![1, 2]);
        assert!(report.is_clean());
    }
}
