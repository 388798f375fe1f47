use serde::Serialize;

/// Body of the greeting endpoints. The field is spelled `messages`
/// (plural) to keep the wire format of the original service.
#[derive(Serialize, Debug)]
pub struct Greeting {
    pub messages: &'static str,
}
