//! Serialization of BigDecimal.
//! Serialization uses the plain decimal string form.

use serde::{Serialize, Serializer};

use crate::num::BigDecimal;

impl Serialize for BigDecimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
