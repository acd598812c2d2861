use dioxus::prelude::*;

use crate::chart::{export_artifact, VisualArtifact};
use crate::core::profile::DisplayMeta;

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working(&'static str),
    Done(String),
    Error(String),
}

#[component]
pub fn ProfileExportPanel(artifact: VisualArtifact, meta: DisplayMeta) -> Element {
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working(label) => {
            Some(("profile-card__meta".to_string(), format!("{label}…")))
        }
        ExportStatus::Done(message) => Some((
            "profile-card__meta profile-card__meta--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "profile-card__meta profile-card__meta--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let export_handler = {
        let mut status_signal = status;
        let mut busy_signal = busy;
        move |_| {
            if busy_signal() {
                return;
            }
            busy_signal.set(true);
            status_signal.set(ExportStatus::Working("Préparation de l'image"));
            match export_artifact(&artifact, &meta) {
                Ok(message) => status_signal.set(ExportStatus::Done(message)),
                Err(err) => {
                    tracing::warn!(%err, "chart export failed");
                    status_signal.set(ExportStatus::Error(err.to_string()));
                }
            }
            busy_signal.set(false);
        }
    };

    rsx! {
        div { class: "profile-export",
            button {
                r#type: "button",
                class: "button button--primary",
                disabled: busy(),
                onclick: export_handler,
                "Enregistrer l'image"
            }

            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}
