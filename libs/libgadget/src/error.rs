use core::fmt;

/// Errors returned by session calls that name a gadget or list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The gadget handle does not resolve (never created, or freed).
    UnknownGadget,
    /// The handle is not the head of a gadget list.
    UnknownList,
    /// The gadget exists but is not of the kind the call needs.
    WrongKind,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownGadget => f.write_str("unknown gadget"),
            Error::UnknownList => f.write_str("not a gadget list"),
            Error::WrongKind => f.write_str("wrong gadget kind"),
        }
    }
}
