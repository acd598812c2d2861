use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::chart::{ChartHost, ProfileRenderer};
use crate::components::ProfileExportPanel;
use crate::core::profile::{DisplayMeta, ResultMapping};

/// Chart for one case. Re-renders whenever `data` or `meta` change; the host
/// keeps a single bound artifact and drops it when the component unmounts.
#[component]
pub fn CognitiveProfileChart(data: ResultMapping, meta: DisplayMeta) -> Element {
    let host = use_hook(|| Rc::new(RefCell::new(ChartHost::mounted(ProfileRenderer::default()))));

    use_drop({
        let host = host.clone();
        move || host.borrow_mut().unmount()
    });

    let artifact = host.borrow_mut().render(&data, &meta).cloned();

    rsx! {
        section { class: "profile-card",
            if let Some(artifact) = artifact {
                figure { class: "profile-chart",
                    img {
                        class: "profile-chart__image",
                        src: "{artifact.data_url()}",
                        alt: "{artifact.title()}",
                        width: "{artifact.width()}",
                        height: "{artifact.height()}",
                    }
                    figcaption { class: "profile-card__meta",
                        "{artifact.labels().len()} indices · {artifact.series().groups.len()} fonctions"
                    }
                }
                ProfileExportPanel { artifact: artifact.clone(), meta: meta.clone() }
            } else {
                p { class: "profile-card__placeholder",
                    "Le graphique s'affichera dès que la zone de dessin sera prête."
                }
            }
        }
    }
}
