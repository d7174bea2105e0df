//! Free-text field extraction.
//!
//! Turns a farmer's description ("aphids on my tomatoes near Tabarka, 28°C,
//! 55% humidity") into a fully populated parameter record. Every field starts
//! at its documented default and is overwritten only by a confident match, so
//! extraction never fails.
//!
//! Matching rules:
//! - Single-valued keyword fields (crop, season, fertilizer type, district,
//!   region) take the leftmost match in the text; at the same position the
//!   longer keyword wins ("pomme de terre" over "pomme").
//! - Place and season names only match as whole words, so "Tunisie" is not
//!   Tunis and "variété" is not summer.
//! - A district match sets both district and region and overrides a
//!   region-only match. Districts spelled like their own region are read as
//!   the region.
//! - Issues collect every match, in vocabulary order.

use crate::models::{
    Domain, FertilizerParameters, GeographicReference, ParameterRecord, PesticideParameters,
    Season,
};
use regex_lite::Regex;
use std::sync::{Arc, LazyLock};

/// A canonical value and the lowercase spellings that denote it.
struct Term {
    canonical: &'static str,
    aliases: &'static [&'static str],
    /// Require non-alphanumeric neighbours, for short or ambiguous keywords.
    whole_word: bool,
}

const fn term(canonical: &'static str, aliases: &'static [&'static str]) -> Term {
    Term {
        canonical,
        aliases,
        whole_word: false,
    }
}

const fn word(canonical: &'static str, aliases: &'static [&'static str]) -> Term {
    Term {
        canonical,
        aliases,
        whole_word: true,
    }
}

const CROPS: &[Term] = &[
    term("tomate", &["tomate", "tomato"]),
    term("pomme de terre", &["pomme de terre", "pommes de terre", "potato"]),
    term("blé", &["blé", "wheat"]),
    term("maïs", &["maïs", "maize"]),
    word("maïs", &["corn"]),
    term("raisin", &["raisin"]),
    word("raisin", &["grape", "grapes"]),
    term("pomme", &["pomme"]),
    word("pomme", &["apple", "apples"]),
    term("olive", &["olive"]),
    term("piment", &["piment", "chili", "pepper"]),
    term("agrumes", &["agrumes", "citrus", "pamplemousse", "grapefruit"]),
    term("oignon", &["oignon", "onion"]),
    term("carotte", &["carotte", "carrot"]),
    term("pastèque", &["pastèque", "watermelon"]),
    term("melon", &["melon"]),
    term("concombre", &["concombre", "cucumber"]),
    term("aubergine", &["aubergine", "eggplant"]),
    term("banana", &["banane", "banana"]),
];

const ISSUES: &[Term] = &[
    term("pucerons", &["puceron", "aphid"]),
    term("mildiou", &["mildiou", "downy mildew"]),
    term("oïdium", &["oïdium", "oidium", "powdery mildew"]),
    term(
        "mouche méditerranéenne",
        &["mouche méditerranéenne", "medfly", "mediterranean fruit fly"],
    ),
    term("thrips", &["thrips"]),
    term("aleurodes", &["aleurode", "whitefl"]),
    term("acariens", &["acarien", "spider mite"]),
    term("fusariose", &["fusariose", "fusarium"]),
    term("noctuelle", &["noctuelle", "cutworm"]),
    term("pyrale", &["pyrale", "corn borer"]),
    term("cochenilles", &["cochenille", "mealybug", "scale insect"]),
    term("pourriture", &["pourriture", "decay"]),
    term("botrytis", &["botrytis", "grey mould", "gray mold"]),
    term("tuta absoluta", &["tuta absoluta", "tomato leafminer"]),
    term("alternariose", &["alternariose", "alternaria", "early blight"]),
    term("anthracnose", &["anthracnose"]),
    term("tavelure", &["tavelure", "scab"]),
];

const FERTILIZER_TYPES: &[Term] = &[
    word("NPK", &["npk"]),
    term("Urea", &["urée", "uree", "urea"]),
    word("DAP", &["dap"]),
    term("Potash", &["potasse", "potash"]),
    term("Compost", &["compost"]),
    term("Manure", &["fumier", "manure"]),
    term("Foliar fertilizer", &["foliai", "foliar"]),
    term("Liquid fertilizer", &["liquide", "liquid"]),
    term(
        "Slow-release fertilizer",
        &["libération lente", "liberation lente", "slow-release", "slow release"],
    ),
];

// All patterns run against lowercased text. Gaps after a label stop at
// sentence punctuation so one label cannot claim the next clause's number.
// A bare N/P/K letter needs either `:`/`=` or a trailing `kg`.
static TEMPERATURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:[.,]\d+)?)\s*°\s*c").unwrap());
static HUMIDITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+(?:[.,]\d+)?)\s*%").unwrap());
static RAINFALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:[.,]\d+)?)\s*mm").unwrap());
static NITROGEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:azote|nitrogen)[^0-9,;.]{0,40}(\d+(?:[.,]\d+)?)|\bn\s*[:=]\s*(\d+(?:[.,]\d+)?)|\bn\s+(\d+(?:[.,]\d+)?)\s*kg",
    )
    .unwrap()
});
static PHOSPHORUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:phosphore|phosphorus)[^0-9,;.]{0,40}(\d+(?:[.,]\d+)?)|\bp\s*[:=]\s*(\d+(?:[.,]\d+)?)|\bp\s+(\d+(?:[.,]\d+)?)\s*kg",
    )
    .unwrap()
});
static POTASSIUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"potassium[^0-9,;.]{0,40}(\d+(?:[.,]\d+)?)|\bk\s*[:=]\s*(\d+(?:[.,]\d+)?)|\bk\s+(\d+(?:[.,]\d+)?)\s*kg",
    )
    .unwrap()
});
static PH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bph\b[^0-9;]{0,20}(\d+(?:[.,]\d+)?)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
struct Location {
    region: String,
    district: Option<String>,
}

pub struct FieldExtractor {
    geography: Arc<GeographicReference>,
    default_region: String,
}

impl FieldExtractor {
    pub fn new(geography: Arc<GeographicReference>) -> Self {
        let default_region = geography.first_region().to_string();
        Self {
            geography,
            default_region,
        }
    }

    /// Region used when the text names none. Unknown names are ignored.
    pub fn with_default_region(mut self, region: &str) -> Self {
        match self.geography.find_region(region) {
            Some(r) => self.default_region = r.name.clone(),
            None => tracing::warn!(
                "Default region '{}' is not in the geography table, keeping '{}'",
                region,
                self.default_region
            ),
        }
        self
    }

    pub fn geography(&self) -> &GeographicReference {
        &self.geography
    }

    pub fn default_region(&self) -> &str {
        &self.default_region
    }

    pub fn extract(&self, text: &str, domain: Domain) -> ParameterRecord {
        match domain {
            Domain::Pesticide => ParameterRecord::Pesticide(self.extract_pesticide(text)),
            Domain::Fertilizer => ParameterRecord::Fertilizer(self.extract_fertilizer(text)),
        }
    }

    pub fn extract_pesticide(&self, text: &str) -> PesticideParameters {
        let lower = text.to_lowercase();
        let mut params = PesticideParameters::defaults(&self.default_region);

        if let Some(crop) = detect_crop(&lower) {
            params.crop = crop.to_string();
        }
        if let Some(location) = self.detect_location(&lower) {
            params.region = location.region;
            if let Some(district) = location.district {
                params.district = district;
            }
        }
        if let Some(season) = detect_season(&lower) {
            params.season = season;
        }

        let issues = detect_issues(&lower);
        if !issues.is_empty() {
            params.issues = issues;
        }

        if let Some(t) = capture_number(&TEMPERATURE, &lower) {
            params.temperature_c = t;
        }
        if let Some(h) = capture_number(&HUMIDITY, &lower) {
            params.humidity_percent = h;
        }
        if let Some(r) = capture_number(&RAINFALL, &lower) {
            params.rainfall_mm = r;
        }

        tracing::debug!(
            crop = %params.crop,
            region = %params.region,
            district = %params.district,
            issues = ?params.issues,
            "Extracted pesticide parameters"
        );
        params
    }

    pub fn extract_fertilizer(&self, text: &str) -> FertilizerParameters {
        let lower = text.to_lowercase();
        let mut params = FertilizerParameters::defaults(&self.default_region);

        if let Some(crop) = detect_crop(&lower) {
            params.crop = crop.to_string();
        }
        if let Some(location) = self.detect_location(&lower) {
            params.region = location.region;
            if let Some(district) = location.district {
                params.district = district;
            }
        }
        if let Some(season) = detect_season(&lower) {
            params.season = season;
        }
        if let Some(kind) = leftmost_longest(&lower, terms(FERTILIZER_TYPES)) {
            params.fertilizer_type = kind.to_string();
        }

        if let Some(n) = capture_number(&NITROGEN, &lower) {
            params.nitrogen_kg_ha = n;
        }
        if let Some(p) = capture_number(&PHOSPHORUS, &lower) {
            params.phosphorus_kg_ha = p;
        }
        if let Some(k) = capture_number(&POTASSIUM, &lower) {
            params.potassium_kg_ha = k;
        }
        if let Some(ph) = capture_number(&PH, &lower) {
            params.ph = ph;
        }

        tracing::debug!(
            crop = %params.crop,
            region = %params.region,
            district = %params.district,
            fertilizer = %params.fertilizer_type,
            "Extracted fertilizer parameters"
        );
        params
    }

    fn detect_location(&self, lower: &str) -> Option<Location> {
        let districts = self.geography.regions().iter().flat_map(|region| {
            region
                .districts
                .iter()
                .filter(move |d| !region.is_seat(d))
                .map(move |d| ((region, d.as_str()), d.to_lowercase(), true))
        });

        if let Some((region, district)) = leftmost_longest(lower, districts) {
            return Some(Location {
                region: region.name.clone(),
                district: Some(district.to_string()),
            });
        }

        let regions = self
            .geography
            .regions()
            .iter()
            .map(|r| (r.name.as_str(), r.name.to_lowercase(), true));

        leftmost_longest(lower, regions).map(|region| Location {
            region: region.to_string(),
            district: None,
        })
    }
}

fn terms(list: &'static [Term]) -> impl Iterator<Item = (&'static str, String, bool)> {
    list.iter().flat_map(|t| {
        t.aliases
            .iter()
            .map(move |alias| (t.canonical, alias.to_string(), t.whole_word))
    })
}

fn detect_crop(lower: &str) -> Option<&'static str> {
    leftmost_longest(lower, terms(CROPS))
}

fn detect_season(lower: &str) -> Option<Season> {
    let keywords = Season::all().iter().flat_map(|season| {
        season
            .keywords()
            .iter()
            .map(move |k| (*season, k.to_string(), true))
    });
    leftmost_longest(lower, keywords)
}

fn detect_issues(lower: &str) -> Vec<String> {
    ISSUES
        .iter()
        .filter(|t| {
            t.aliases
                .iter()
                .any(|alias| find_keyword(lower, alias, t.whole_word).is_some())
        })
        .map(|t| t.canonical.to_string())
        .collect()
}

/// First occurrence of `needle`, optionally only as a whole word.
fn find_keyword(haystack: &str, needle: &str, whole_word: bool) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    haystack.match_indices(needle).map(|(i, _)| i).find(|&i| {
        if !whole_word {
            return true;
        }
        let before = haystack[..i].chars().next_back();
        let after = haystack[i + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// The candidate whose keyword appears earliest; the longer keyword wins at
/// the same position, then the earlier candidate.
fn leftmost_longest<T>(
    haystack: &str,
    candidates: impl IntoIterator<Item = (T, String, bool)>,
) -> Option<T> {
    let mut best: Option<(usize, usize, T)> = None;
    for (value, needle, whole_word) in candidates {
        let Some(start) = find_keyword(haystack, &needle, whole_word) else {
            continue;
        };
        let better = match &best {
            None => true,
            Some((best_start, best_len, _)) => {
                start < *best_start || (start == *best_start && needle.len() > *best_len)
            }
        };
        if better {
            best = Some((start, needle.len(), value));
        }
    }
    best.map(|(_, _, value)| value)
}

fn capture_number(re: &Regex, lower: &str) -> Option<f64> {
    let caps = re.captures(lower)?;
    let raw = caps.iter().skip(1).flatten().next()?.as_str();
    raw.replace(',', ".").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Region, UNSPECIFIED};

    fn extractor() -> FieldExtractor {
        FieldExtractor::new(Arc::new(GeographicReference::tunisia()))
    }

    #[test]
    fn empty_text_yields_default_pesticide_record() {
        let params = extractor().extract_pesticide("");
        assert_eq!(params, PesticideParameters::defaults("Jendouba"));
        assert_eq!(params.crop, "tomate");
        assert_eq!(params.district, UNSPECIFIED);
        assert_eq!(params.issues, vec!["pucerons", "mildiou"]);
        assert_eq!(params.season, Season::Summer);
        assert_eq!(params.temperature_c, 25.0);
        assert_eq!(params.humidity_percent, 70.0);
        assert_eq!(params.rainfall_mm, 10.0);
    }

    #[test]
    fn empty_text_yields_default_fertilizer_record() {
        let params = extractor().extract_fertilizer("");
        assert_eq!(params, FertilizerParameters::defaults("Jendouba"));
        assert_eq!(params.crop, "maïs");
        assert_eq!(params.fertilizer_type, "NPK");
        assert_eq!(params.season, Season::Spring);
    }

    #[test]
    fn extraction_is_idempotent_on_defaults() {
        let ex = extractor();
        assert_eq!(
            ex.extract("", Domain::Pesticide),
            ex.extract("", Domain::Pesticide)
        );
        assert_eq!(ex.extract("   ", Domain::Fertilizer).domain(), Domain::Fertilizer);
    }

    #[test]
    fn each_crop_keyword_alone_is_detected() {
        let ex = extractor();
        for t in CROPS {
            for alias in t.aliases {
                let text = format!("J'ai un problème sur mes {} cette année", alias);
                assert_eq!(ex.extract_pesticide(&text).crop, t.canonical, "{}", alias);
            }
        }
    }

    #[test]
    fn longer_crop_wins_at_same_position() {
        let params = extractor().extract_pesticide("Mes pommes de terre sont attaquées");
        assert_eq!(params.crop, "pomme de terre");
        let params = extractor().extract_pesticide("Pomme de terre et tomate");
        assert_eq!(params.crop, "pomme de terre");
    }

    #[test]
    fn first_crop_mentioned_wins() {
        let params = extractor().extract_pesticide("tomate à côté du blé");
        assert_eq!(params.crop, "tomate");
        let params = extractor().extract_pesticide("blé à côté des tomates");
        assert_eq!(params.crop, "blé");
    }

    #[test]
    fn english_fruit_names_require_whole_word() {
        let ex = extractor();
        assert_eq!(ex.extract_pesticide("my grapefruit trees").crop, "agrumes");
        assert_eq!(ex.extract_pesticide("pineapple rows").crop, "tomate");
        assert_eq!(ex.extract_pesticide("apples and pears").crop, "pomme");
        assert_eq!(ex.extract_pesticide("table grapes").crop, "raisin");
    }

    #[test]
    fn corn_requires_whole_word() {
        let params = extractor().extract_pesticide("acorn husks everywhere");
        assert_eq!(params.crop, "tomate");
        let params = extractor().extract_pesticide("my corn field");
        assert_eq!(params.crop, "maïs");
    }

    #[test]
    fn country_name_does_not_match_tunis() {
        let params = extractor().extract_pesticide("Ma ferme en Tunisie, région de Sfax");
        assert_eq!(params.region, "Sfax");
        assert_eq!(params.district, UNSPECIFIED);

        let params = extractor().extract_pesticide("olive groves in Tunisia");
        assert_eq!(params.region, "Jendouba");
    }

    #[test]
    fn district_inside_common_word_is_ignored() {
        // "Douz" (Kébili) inside "douze".
        let params = extractor().extract_pesticide("Pucerons depuis douze jours à Bizerte");
        assert_eq!(params.region, "Bizerte");
        assert_eq!(params.district, UNSPECIFIED);
    }

    #[test]
    fn each_region_alone_sets_region_only() {
        let ex = extractor();
        for region in ex.geography().region_names() {
            let text = format!("Ma ferme se trouve à {}.", region);
            let params = ex.extract_pesticide(&text);
            assert_eq!(params.region, region, "{}", text);
            assert_eq!(params.district, UNSPECIFIED, "{}", text);
        }
    }

    #[test]
    fn each_district_alone_sets_owner_region() {
        let ex = extractor();
        for region in ex.geography().regions() {
            for district in region.districts.iter().filter(|d| !region.is_seat(d)) {
                let text = format!("Parcelle près de {}", district);
                let params = ex.extract_pesticide(&text);
                assert_eq!(params.district, *district, "{}", text);
                assert_eq!(params.region, region.name, "{}", text);
            }
        }
    }

    #[test]
    fn district_overrides_earlier_region_mention() {
        let params = extractor().extract_pesticide("Je suis de Monastir mais ma parcelle est à Sousse Jawhara");
        assert_eq!(params.region, "Sousse");
        assert_eq!(params.district, "Sousse Jawhara");
    }

    #[test]
    fn sousse_jawhara_in_monastir_resolves_to_sousse() {
        let params = extractor().extract_pesticide("Sousse Jawhara in Monastir");
        assert_eq!(params.region, "Sousse");
        assert_eq!(params.district, "Sousse Jawhara");
    }

    #[test]
    fn region_name_inside_district_name() {
        let params = extractor().extract_fertilizer("Oliveraie à Hammam Sousse");
        assert_eq!(params.region, "Sousse");
        assert_eq!(params.district, "Hammam Sousse");
    }

    #[test]
    fn longer_district_beats_contained_district_of_other_region() {
        // "Haffouz" (Kairouan) sits inside "Ouled Haffouz" (Sidi Bouzid).
        let params = extractor().extract_pesticide("Ouled Haffouz");
        assert_eq!(params.region, "Sidi Bouzid");
        assert_eq!(params.district, "Ouled Haffouz");
    }

    #[test]
    fn region_substring_of_district_elsewhere() {
        let geo = GeographicReference::new(vec![
            Region::new("Marsa", vec!["Port".into()]),
            Region::new("Coast", vec!["Marsa Beach".into()]),
        ])
        .unwrap();
        let ex = FieldExtractor::new(Arc::new(geo));

        let params = ex.extract_pesticide("near marsa beach");
        assert_eq!(params.region, "Coast");
        assert_eq!(params.district, "Marsa Beach");

        let params = ex.extract_pesticide("near marsa");
        assert_eq!(params.region, "Marsa");
        assert_eq!(params.district, UNSPECIFIED);
    }

    #[test]
    fn first_region_mentioned_wins() {
        let params = extractor().extract_pesticide("entre Sfax et Gabès");
        assert_eq!(params.region, "Sfax");
        let params = extractor().extract_pesticide("entre Gabès et Sfax");
        assert_eq!(params.region, "Gabès");
    }

    #[test]
    fn default_region_is_configurable() {
        let ex = extractor().with_default_region("nabeul");
        assert_eq!(ex.extract_pesticide("rien").region, "Nabeul");
        let ex = extractor().with_default_region("Atlantis");
        assert_eq!(ex.default_region(), "Jendouba");
    }

    #[test]
    fn season_detection_first_mention_wins() {
        let ex = extractor();
        assert_eq!(ex.extract_pesticide("en hiver").season, Season::Winter);
        assert_eq!(ex.extract_pesticide("au printemps puis en été").season, Season::Spring);
        assert_eq!(ex.extract_fertilizer("before winter, after autumn").season, Season::Winter);
    }

    #[test]
    fn season_word_inside_longer_word_is_ignored() {
        let ex = extractor();
        assert_eq!(
            ex.extract_pesticide("Une variété de blé semée en hiver").season,
            Season::Winter
        );
        assert_eq!(ex.extract_fertilizer("propriété de la société").season, Season::Spring);
        assert_eq!(ex.extract_fertilizer("récolte d'été").season, Season::Summer);
    }

    #[test]
    fn numeric_readings_with_units() {
        let params = extractor().extract_pesticide("28°C and 55% humidity with 12mm rain");
        assert_eq!(params.temperature_c, 28.0);
        assert_eq!(params.humidity_percent, 55.0);
        assert_eq!(params.rainfall_mm, 12.0);
    }

    #[test]
    fn numeric_readings_tolerate_spaces_and_decimals() {
        let params = extractor().extract_pesticide("il fait 31,5 °C, 80 % d'humidité, 4 mm de pluie");
        assert_eq!(params.temperature_c, 31.5);
        assert_eq!(params.humidity_percent, 80.0);
        assert_eq!(params.rainfall_mm, 4.0);
    }

    #[test]
    fn numbers_without_units_are_ignored() {
        let params = extractor().extract_pesticide("no numbers here");
        assert_eq!(params.temperature_c, 25.0);
        assert_eq!(params.humidity_percent, 70.0);
        assert_eq!(params.rainfall_mm, 10.0);

        let params = extractor().extract_pesticide("28 degrees, 55 humidity, 12 of rain");
        assert_eq!(params.temperature_c, 25.0);
        assert_eq!(params.humidity_percent, 70.0);
        assert_eq!(params.rainfall_mm, 10.0);
    }

    #[test]
    fn issues_follow_vocabulary_order_not_text_order() {
        let params = extractor().extract_pesticide("botrytis, thrips et pucerons sur tomate");
        assert_eq!(params.issues, vec!["pucerons", "thrips", "botrytis"]);
        assert_eq!(
            params.problem_description(" and "),
            "pucerons and thrips and botrytis"
        );
    }

    #[test]
    fn issue_aliases_map_to_canonical_names() {
        let params = extractor().extract_pesticide("aphids and powdery mildew");
        assert_eq!(params.issues, vec!["pucerons", "oïdium"]);
    }

    #[test]
    fn no_issue_keeps_default_pair() {
        let params = extractor().extract_pesticide("les feuilles jaunissent");
        assert_eq!(params.issues, vec!["pucerons", "mildiou"]);
    }

    #[test]
    fn fertilizer_labeled_values() {
        let text = "Analyse du sol : Azote (N) 60 kg/ha, Phosphore (P) 35 kg/ha, \
                    Potassium (K) 90 kg/ha, pH 7,8. Je voudrais utiliser du fumier.";
        let params = extractor().extract_fertilizer(text);
        assert_eq!(params.nitrogen_kg_ha, 60.0);
        assert_eq!(params.phosphorus_kg_ha, 35.0);
        assert_eq!(params.potassium_kg_ha, 90.0);
        assert_eq!(params.ph, 7.8);
        assert_eq!(params.fertilizer_type, "Manure");
    }

    #[test]
    fn fertilizer_short_labels() {
        let params = extractor().extract_fertilizer("N: 45, P=20, K: 15, ph 5.5");
        assert_eq!(params.nitrogen_kg_ha, 45.0);
        assert_eq!(params.phosphorus_kg_ha, 20.0);
        assert_eq!(params.potassium_kg_ha, 15.0);
        assert_eq!(params.ph, 5.5);
    }

    #[test]
    fn fertilizer_bare_letters_followed_by_kg() {
        let params = extractor().extract_fertilizer("N 60 kg/ha, P 35 kg/ha, K 90 kg/ha");
        assert_eq!(params.nitrogen_kg_ha, 60.0);
        assert_eq!(params.phosphorus_kg_ha, 35.0);
        assert_eq!(params.potassium_kg_ha, 90.0);

        let params = extractor().extract_fertilizer("parcelle n 12 au nord");
        let defaults = FertilizerParameters::defaults("Jendouba");
        assert_eq!(params.nitrogen_kg_ha, defaults.nitrogen_kg_ha);
    }

    #[test]
    fn phosphore_does_not_count_as_ph() {
        let params = extractor().extract_fertilizer("phosphore 40");
        assert_eq!(params.phosphorus_kg_ha, 40.0);
        assert_eq!(params.ph, FertilizerParameters::DEFAULT_PH);
    }

    #[test]
    fn fertilizer_type_requires_whole_word_for_acronyms() {
        let ex = extractor();
        assert_eq!(ex.extract_fertilizer("adapter la dose").fertilizer_type, "NPK");
        assert_eq!(ex.extract_fertilizer("du DAP en fond").fertilizer_type, "DAP");
        assert_eq!(
            ex.extract_fertilizer("engrais à libération lente").fertilizer_type,
            "Slow-release fertilizer"
        );
    }

    #[test]
    fn extract_dispatches_on_domain() {
        let ex = extractor();
        let record = ex.extract("tomate à Tabarka", Domain::Fertilizer);
        assert_eq!(record.domain(), Domain::Fertilizer);
        assert_eq!(record.crop(), "tomate");
        assert_eq!(record.region(), "Jendouba");
        assert_eq!(record.district(), "Tabarka");
    }
}
