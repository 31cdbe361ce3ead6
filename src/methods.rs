use crate::errors::{RouteError, RouterResult};
use std::fmt;
use std::str::FromStr;

bitflags::bitflags! {
    /// HTTP methods a route is constrained to. The core never interprets
    /// the set itself; it is carried as matching metadata.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MethodSet: u8 {
        const GET = 1;
        const POST = 1 << 1;
        const PUT = 1 << 2;
        const DELETE = 1 << 3;
        const PATCH = 1 << 4;
        const HEAD = 1 << 5;
        const OPTIONS = 1 << 6;
    }
}

const METHOD_NAMES: [(MethodSet, &str); 7] = [
    (MethodSet::GET, "GET"),
    (MethodSet::POST, "POST"),
    (MethodSet::PUT, "PUT"),
    (MethodSet::DELETE, "DELETE"),
    (MethodSet::PATCH, "PATCH"),
    (MethodSet::HEAD, "HEAD"),
    (MethodSet::OPTIONS, "OPTIONS"),
];

impl MethodSet {
    pub fn from_names<I, S>(names: I) -> RouterResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = MethodSet::empty();
        for name in names {
            set |= name.as_ref().parse()?;
        }
        Ok(set)
    }
}

impl FromStr for MethodSet {
    type Err = RouteError;

    fn from_str(s: &str) -> RouterResult<Self> {
        METHOD_NAMES
            .iter()
            .find(|(_, name)| s.eq_ignore_ascii_case(name))
            .map(|(flag, _)| *flag)
            .ok_or_else(|| RouteError::UnknownMethod {
                method: s.to_string(),
            })
    }
}

impl fmt::Display for MethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (flag, name) in METHOD_NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}
