//! Material Card Component

use leptos::prelude::*;

use crate::markdown::excerpt;
use crate::models::{format_price, Material};

/// Catalogue tile: thumbnail, title, subject/type line, price and the
/// caller's action buttons
#[component]
pub fn MaterialCard(material: Material, children: Children) -> impl IntoView {
    let price_class = if material.is_free() { "price free" } else { "price" };

    view! {
        <article class="material-card">
            {material.thumbnail.clone().map(|src| view! {
                <img class="material-thumb" src=src alt="" />
            })}
            <div class="material-body">
                <h3 class="material-title">{material.title.clone()}</h3>
                <div class="material-meta">
                    {format!("{} · {}", material.subject.subject_name, material.material_type.type_name)}
                </div>
                <p class="material-excerpt">{excerpt(&material.description, 140)}</p>
                <div class="material-footer">
                    <span class=price_class>{format_price(material.price)}</span>
                    <div class="material-actions">{children()}</div>
                </div>
            </div>
        </article>
    }
}
