use chrono::Utc;
use rand::{Rng, distributions::Alphanumeric};

use crate::model::link::{BackgroundLink, LinkField};
use crate::model::plan::Plan;

/// Append a new empty link and return a reference to it.
pub fn add_link(plan: &mut Plan) -> &BackgroundLink {
    let link = BackgroundLink::empty(new_link_id());
    plan.links.push(link);
    // just pushed
    plan.links.last().unwrap()
}

/// Set one field of the link with the given id. Returns false when no
/// such link exists.
pub fn update_link(plan: &mut Plan, id: &str, field: LinkField, value: &str) -> bool {
    let Some(link) = plan.links.iter_mut().find(|l| l.id == id) else {
        return false;
    };
    match field {
        LinkField::Name => link.name = value.to_string(),
        LinkField::Url => link.url = value.to_string(),
    }
    true
}

/// Remove the link with the given id. Returns false when no such link
/// exists.
pub fn delete_link(plan: &mut Plan, id: &str) -> bool {
    let before = plan.links.len();
    plan.links.retain(|l| l.id != id);
    plan.links.len() != before
}

/// Links complete enough to show as navigation.
pub fn nav_links(plan: &Plan) -> Vec<&BackgroundLink> {
    plan.links.iter().filter(|l| l.is_navigable()).collect()
}

/// `link-<unix-millis>-<6 alphanumeric chars>`. Uniqueness is
/// probabilistic; the random suffix makes a same-millisecond collision
/// negligible for interactive use.
fn new_link_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("link-{}-{}", Utc::now().timestamp_millis(), suffix)
}
