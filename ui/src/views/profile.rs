use dioxus::prelude::*;

use crate::components::CognitiveProfileChart;
use crate::core::profile::ProfileDocument;

const SAMPLE_PROFILE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/sample_profile.json"
));

#[component]
pub fn Profile() -> Element {
    let document = use_hook(|| {
        ProfileDocument::from_json_str(SAMPLE_PROFILE).map_err(|err| {
            tracing::error!(%err, "bundled profile failed to load");
            err.to_string()
        })
    });

    let body = match document {
        Ok(ProfileDocument { meta, results }) => rsx! {
            CognitiveProfileChart { data: results, meta }
        },
        Err(err) => rsx! {
            p { class: "profile-card__meta profile-card__meta--error", "⚠️ Profil illisible : {err}" }
        },
    };

    rsx! {
        section { class: "page page-profile",
            h1 { "Profil cognitif" }
            p {
                "Percentiles par indice, regroupés par fonction cognitive, sur fond des zones d'interprétation clinique."
            }
            {body}
        }
    }
}
