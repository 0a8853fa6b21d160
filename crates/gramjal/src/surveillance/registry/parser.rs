use serde::Deserialize;
use std::io::Read;

/// One CSV row of the village registry export.
#[derive(Debug, Deserialize)]
pub(crate) struct RegistryRow {
    #[serde(rename = "Village ID")]
    pub(crate) id: String,
    #[serde(rename = "Name")]
    pub(crate) name: String,
    #[serde(rename = "Population")]
    pub(crate) population: u32,
    #[serde(rename = "ASHA Worker")]
    pub(crate) asha_worker: String,
    #[serde(rename = "Water Sources", default)]
    pub(crate) water_sources: String,
    #[serde(rename = "Water Quality")]
    pub(crate) water_quality: String,
    #[serde(rename = "pH")]
    pub(crate) ph: f64,
    #[serde(rename = "Turbidity NTU")]
    pub(crate) turbidity_ntu: f64,
    #[serde(rename = "Coliform CFU")]
    pub(crate) coliform_cfu: u32,
    #[serde(rename = "Chlorine mg/L")]
    pub(crate) chlorine_mg_l: f64,
    #[serde(rename = "Diarrhea", default)]
    pub(crate) diarrhea: u32,
    #[serde(rename = "Cholera", default)]
    pub(crate) cholera: u32,
    #[serde(rename = "Typhoid", default)]
    pub(crate) typhoid: u32,
    #[serde(rename = "Hepatitis", default)]
    pub(crate) hepatitis: u32,
    #[serde(rename = "Updated On")]
    pub(crate) updated_on: String,
}

impl RegistryRow {
    /// Semicolon-separated source list, empty entries dropped.
    pub(crate) fn sources(&self) -> Vec<String> {
        self.water_sources
            .split(';')
            .map(str::trim)
            .filter(|source| !source.is_empty())
            .map(str::to_string)
            .collect()
    }
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<RegistryRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize::<RegistryRow>().collect()
}
