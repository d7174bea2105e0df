use crate::error::{FarmwiseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Governorates of Tunisia and their districts, in the order the advisory
/// forms present them.
const TUNISIA: &[(&str, &[&str])] = &[
    ("Jendouba", &["Jendouba", "Bousalem", "Fernana", "Ghardimaou", "Ain Draham", "Tabarka", "Beni Mtir"]),
    ("Bizerte", &["Bizerte", "Mateur", "Menzel Bourguiba", "Ras Jebel", "Sejnane", "El Alia", "Ghar El Melh"]),
    ("Kairouan", &["Kairouan Nord", "Kairouan Sud", "Chebika", "Sbikha", "Haffouz", "Hajeb El Ayoun", "Nasrallah"]),
    ("Kasserine", &["Kasserine Nord", "Kasserine Sud", "Sbeitla", "Thala", "Feriana", "Foussana", "Majel Bel Abbès"]),
    ("Sfax", &["Sfax Ville", "Sfax Ouest", "Sfax Sud", "Sakiet Ezzit", "Sakiet Eddaier", "Mahres", "Jbeniana", "Kerkennah"]),
    ("Gabès", &["Gabès Ville", "Gabès Ouest", "Gabès Sud", "Mareth", "El Hamma", "Menzel Habib", "Matmata"]),
    ("Tataouine", &["Tataouine Nord", "Tataouine Sud", "Remada", "Bir Lahmar", "Ghomrassen", "Dhehiba"]),
    ("Tunis", &["Tunis Ville", "Bab El Bhar", "La Marsa", "Le Bardo", "El Omrane", "El Menzah", "Ezzouhour"]),
    ("Ariana", &["Ariana Ville", "Soukra", "Raoued", "Kalaat El Andalous", "Sidi Thabet", "Ettadhamen"]),
    ("Ben Arous", &["Ben Arous", "Ezzahra", "Radès", "Mégrine", "Mohamedia", "Fouchana", "Mornag"]),
    ("Manouba", &["Manouba", "Douar Hicher", "Oued Ellil", "Tebourba", "Mornaguia", "El Batan", "Jedaida"]),
    ("Nabeul", &["Nabeul", "Hammamet", "Kélibia", "Korba", "Menzel Temime", "Grombalia", "Beni Khiar", "Dar Chaabane"]),
    ("Zaghouan", &["Zaghouan", "Zriba", "Bir Mcherga", "Fahs", "El Nadhour", "Saouaf"]),
    ("Béja", &["Béja Nord", "Béja Sud", "Medjez El Bab", "Testour", "Téboursouk", "Nefza", "Amdoun"]),
    ("Le Kef", &["Le Kef Est", "Le Kef Ouest", "Tajerouine", "Sakiet Sidi Youssef", "Kalaa Khasba", "Dahmani", "Jérissa"]),
    ("Siliana", &["Siliana Nord", "Siliana Sud", "Bou Arada", "Gaafour", "El Krib", "Bourouis", "Maktar"]),
    ("Sousse", &["Sousse Ville", "Sousse Jawhara", "Sousse Riadh", "Hammam Sousse", "Akouda", "Kalaa Kebira", "Msaken", "Enfidha"]),
    ("Monastir", &["Monastir", "Ksar Hellal", "Moknine", "Jammel", "Sahline", "Zéramdine", "Bembla", "Téboulba"]),
    ("Mahdia", &["Mahdia", "Bou Merdes", "Ouled Chamekh", "Chorbane", "Chebba", "El Jem", "Ksour Essef", "Sidi Alouane"]),
    ("Sidi Bouzid", &["Sidi Bouzid Est", "Sidi Bouzid Ouest", "Jelma", "Regueb", "Ouled Haffouz", "Meknassy", "Mezzouna", "Bir El Hafey"]),
    ("Gafsa", &["Gafsa Nord", "Gafsa Sud", "Sened", "Mdhilla", "El Ksar", "Métlaoui", "Redeyef", "Moularès"]),
    ("Tozeur", &["Tozeur", "Degache", "Nefta", "Tamaghza", "Hazoua", "Hammet El Jérid"]),
    ("Kébili", &["Kébili Nord", "Kébili Sud", "Souk El Ahed", "Douz", "El Faouar", "Réjim Maatoug"]),
    ("Médenine", &["Médenine Nord", "Médenine Sud", "Beni Khedache", "Ben Gardane", "Zarzis", "Houmt Souk", "Midoun", "Ajim"]),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub districts: Vec<String>,
}

impl Region {
    pub fn new(name: impl Into<String>, districts: Vec<String>) -> Self {
        Self {
            name: name.into(),
            districts,
        }
    }

    /// Case-insensitive district lookup, returning the canonical spelling.
    pub fn find_district(&self, name: &str) -> Option<&str> {
        let wanted = name.trim().to_lowercase();
        self.districts
            .iter()
            .find(|d| d.to_lowercase() == wanted)
            .map(String::as_str)
    }

    /// True when this district is the region's own seat, spelled exactly like the region.
    pub fn is_seat(&self, district: &str) -> bool {
        district.to_lowercase() == self.name.to_lowercase()
    }
}

#[derive(Debug, Deserialize)]
struct GeographyFile {
    regions: Vec<Region>,
}

/// Immutable region -> districts table.
///
/// Insertion order is preserved because extraction tie-breaking depends on it.
/// Every district belongs to exactly one region; all lookups ignore case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeographicReference {
    regions: Vec<Region>,
}

impl GeographicReference {
    pub fn new(regions: Vec<Region>) -> Result<Self> {
        if regions.is_empty() {
            return Err(FarmwiseError::Config(
                "geography must define at least one region".into(),
            ));
        }

        let mut seen_regions: HashMap<String, &str> = HashMap::new();
        let mut seen_districts: HashMap<String, &str> = HashMap::new();

        for region in &regions {
            let key = region.name.trim().to_lowercase();
            if key.is_empty() {
                return Err(FarmwiseError::Config("region name cannot be empty".into()));
            }
            if seen_regions.insert(key, &region.name).is_some() {
                return Err(FarmwiseError::Config(format!(
                    "region '{}' is defined more than once",
                    region.name
                )));
            }

            for district in &region.districts {
                let key = district.trim().to_lowercase();
                if key.is_empty() {
                    return Err(FarmwiseError::Config(format!(
                        "region '{}' has an empty district name",
                        region.name
                    )));
                }
                if let Some(owner) = seen_districts.insert(key, &region.name) {
                    return Err(FarmwiseError::Config(format!(
                        "district '{}' belongs to both '{}' and '{}'",
                        district, owner, region.name
                    )));
                }
            }
        }

        Ok(Self { regions })
    }

    /// The built-in table of the 24 Tunisian governorates.
    pub fn tunisia() -> Self {
        let regions = TUNISIA
            .iter()
            .map(|(name, districts)| {
                Region::new(*name, districts.iter().map(|d| d.to_string()).collect())
            })
            .collect();

        // The static table is known to satisfy the invariants checked in `new`.
        Self { regions }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: GeographyFile = serde_yaml::from_str(content)?;
        Self::new(file.regions)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FarmwiseError::Config(format!(
                "Failed to read geography file {}: {}",
                path.display(),
                e
            ))
        })?;
        let reference = Self::from_yaml_str(&content)?;
        tracing::debug!(
            regions = reference.regions.len(),
            districts = reference.district_count(),
            "Loaded geography from {}",
            path.display()
        );
        Ok(reference)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region_names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.name.as_str())
    }

    pub fn first_region(&self) -> &str {
        // `new` rejects empty tables and `tunisia` is non-empty.
        &self.regions[0].name
    }

    pub fn find_region(&self, name: &str) -> Option<&Region> {
        let wanted = name.trim().to_lowercase();
        self.regions.iter().find(|r| r.name.to_lowercase() == wanted)
    }

    /// Owning region of a district, with the district's canonical spelling.
    pub fn locate_district(&self, district: &str) -> Option<(&Region, &str)> {
        self.regions
            .iter()
            .find_map(|r| r.find_district(district).map(|d| (r, d)))
    }

    pub fn district_count(&self) -> usize {
        self.regions.iter().map(|r| r.districts.len()).sum()
    }
}

impl Default for GeographicReference {
    fn default() -> Self {
        Self::tunisia()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tunisia_has_24_regions() {
        let geo = GeographicReference::tunisia();
        assert_eq!(geo.regions().len(), 24);
        assert_eq!(geo.first_region(), "Jendouba");
        assert_eq!(geo.district_count(), 171);
    }

    #[test]
    fn builtin_table_satisfies_invariants() {
        let geo = GeographicReference::tunisia();
        assert!(GeographicReference::new(geo.regions().to_vec()).is_ok());
    }

    #[test]
    fn region_lookup_is_case_insensitive() {
        let geo = GeographicReference::tunisia();
        assert_eq!(geo.find_region("sousse").map(|r| r.name.as_str()), Some("Sousse"));
        assert_eq!(geo.find_region("LE KEF").map(|r| r.name.as_str()), Some("Le Kef"));
        assert!(geo.find_region("Paris").is_none());
    }

    #[test]
    fn locate_district_returns_owner() {
        let geo = GeographicReference::tunisia();
        let (region, district) = geo.locate_district("sousse jawhara").unwrap();
        assert_eq!(region.name, "Sousse");
        assert_eq!(district, "Sousse Jawhara");

        let (region, _) = geo.locate_district("Ouled Haffouz").unwrap();
        assert_eq!(region.name, "Sidi Bouzid");
        let (region, _) = geo.locate_district("Haffouz").unwrap();
        assert_eq!(region.name, "Kairouan");
    }

    #[test]
    fn seat_district_detection() {
        let geo = GeographicReference::tunisia();
        let jendouba = geo.find_region("Jendouba").unwrap();
        assert!(jendouba.is_seat("Jendouba"));
        assert!(!jendouba.is_seat("Tabarka"));
    }

    #[test]
    fn rejects_district_in_two_regions() {
        let regions = vec![
            Region::new("North", vec!["Hill".into()]),
            Region::new("South", vec!["hill".into()]),
        ];
        let err = GeographicReference::new(regions).unwrap_err();
        assert!(err.to_string().contains("belongs to both"));
    }

    #[test]
    fn rejects_duplicate_and_empty_tables() {
        assert!(GeographicReference::new(Vec::new()).is_err());
        let regions = vec![
            Region::new("North", vec![]),
            Region::new("north", vec![]),
        ];
        assert!(GeographicReference::new(regions).is_err());
    }

    #[test]
    fn parses_yaml_table_in_order() {
        let yaml = r#"
regions:
  - name: Coast
    districts: [Harbor, Bay]
  - name: Hills
    districts: [Ridge]
"#;
        let geo = GeographicReference::from_yaml_str(yaml).unwrap();
        let names: Vec<_> = geo.region_names().collect();
        assert_eq!(names, vec!["Coast", "Hills"]);
        assert_eq!(geo.find_region("hills").unwrap().districts, ["Ridge".to_string()]);
    }

    #[test]
    fn example_geography_file_is_valid() {
        let yaml = include_str!("../../config/geography.yaml.example");
        let geo = GeographicReference::from_yaml_str(yaml).unwrap();
        assert_eq!(geo.first_region(), "Jendouba");
        let (region, _) = geo.locate_district("ouled haffouz").unwrap();
        assert_eq!(region.name, "Sidi Bouzid");
    }
}
