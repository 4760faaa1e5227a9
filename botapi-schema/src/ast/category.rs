/// Whether a [`super::Definition`] is an API entity or an API method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// An entity received from the API (the `---types---` section).
    Types,
    /// A method request (the `---methods---` section).
    Methods,
}
