//! Reference table of cognitive functions and the collection-side draft that
//! turns a clinician's selections into a [`ResultMapping`].

use std::collections::{BTreeSet, HashMap};

use super::profile::{check_percentile, ProfileError, ResultMapping};

pub const FUNCTION_CATALOG: &[(&str, &[&str])] = &[
    (
        "Fonctionnement intellectuel global",
        &[
            "QI",
            "GAI",
            "Compréhension verbale",
            "Raisonnement perceptif",
            "Mémoire de travail",
            "Vitesse de traitement",
        ],
    ),
    (
        "Fonctions exécutives",
        &[
            "Figure de Rey Rappel Immédiat",
            "Figure de Rey Rappel Différé",
            "Figure de Rey Temps de Copie",
            "Figure de Rey Reconnaissance",
            "Stroop D-Kefs Dénomination de couleur",
            "Stroop D-Kefs Lecture de mots",
            "Stroop D-Kefs Inhibition",
            "Stroop D-Kefs Inhibition/Alternance",
            "Tour D-Kefs Score de réussite total",
            "Tour D-Kefs Temps moyen 1er mouvement",
            "Tour D-Kefs Ratio temps-par-mouvement",
            "Tour D-Kefs Ratio précision de mouvement",
            "Tour D-Kefs Ratio violation de règle par item",
            "Trail-Making Temps trail A",
            "Trail-Making Temps trail B",
            "Wisconsin Nombre d’essais",
            "Wisconsin Nombre de réponse correcte",
            "Wisconsin Nombre d’erreurs",
            "Wisconsin Réponses persévératives",
            "Wisconsin Erreurs persévératives",
            "Wisconsin Erreurs non-persévératives",
            "Wisconsin Niveau de réponses conceptuelles",
            "Wisconsin Nombre de catégories complétées",
            "Wisconsin Nombre d’essais pour compléter la première catégorie",
            "Wisconsin Échec du maintien de catégorie",
            "Wisconsin Apprendre à apprendre",
        ],
    ),
    (
        "Attention",
        &[
            "CPT-3 Détectabilité",
            "CPT-3 Omissions",
            "CPT-3 Commissions",
            "CPT-3 Persévérations",
            "CPT-3 HRT",
            "CPT-3 Variabilité",
            "CPT-3 HRT Block change",
            "CPT-3 HRT ISI",
        ],
    ),
];

pub fn function_names() -> impl Iterator<Item = &'static str> {
    FUNCTION_CATALOG.iter().map(|(name, _)| *name)
}

pub fn indices_for(function: &str) -> Option<&'static [&'static str]> {
    FUNCTION_CATALOG
        .iter()
        .find(|(name, _)| *name == function)
        .map(|(_, indices)| *indices)
}

/// Cognitive function owning `index`, if the catalogue knows it.
pub fn function_of(index: &str) -> Option<&'static str> {
    FUNCTION_CATALOG
        .iter()
        .find(|(_, indices)| indices.contains(&index))
        .map(|(name, _)| *name)
}

/// Selections and percentile entries gathered before a chart is drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    selected: BTreeSet<String>,
    results: HashMap<String, f64>,
}

impl ProfileDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, index: &str) -> Result<(), ProfileError> {
        if function_of(index).is_none() {
            return Err(ProfileError::UnknownIndex(index.to_string()));
        }
        self.selected.insert(index.to_string());
        Ok(())
    }

    pub fn deselect(&mut self, index: &str) {
        self.selected.remove(index);
    }

    pub fn is_selected(&self, index: &str) -> bool {
        self.selected.contains(index)
    }

    pub fn set_percentile(&mut self, index: &str, value: f64) -> Result<(), ProfileError> {
        if function_of(index).is_none() {
            return Err(ProfileError::UnknownIndex(index.to_string()));
        }
        check_percentile(index, value)?;
        self.results.insert(index.to_string(), value);
        Ok(())
    }

    /// Selected indices with no percentile entered yet.
    pub fn missing_results(&self) -> Vec<&str> {
        self.selected
            .iter()
            .filter(|index| !self.results.contains_key(index.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Builds the chart input in catalogue order.
    ///
    /// Unselected indices are left out even when a value was typed for them, a
    /// selected index with no value resolves to 0, and functions without any
    /// selected index are omitted.
    pub fn to_mapping(&self) -> ResultMapping {
        let mut mapping = ResultMapping::new();
        for (function, indices) in FUNCTION_CATALOG {
            for index in indices.iter().filter(|index| self.selected.contains(**index)) {
                let value = self.results.get(*index).copied().unwrap_or(0.0);
                mapping.insert(*function, *index, value);
            }
        }
        mapping
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.results.clear();
    }
}
