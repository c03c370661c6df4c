use std::any::{type_name, Any};
use std::hash::{Hash, Hasher};

use thiserror::Error;

use crate::result::{FacsimileError, FacsimileResult};
use crate::Equivalent;

/// Equality over a chosen subset of fields, plus the hashes that go with it.
///
/// Usually derived with [`macro@crate::Equivalent`]:
///
/// ```
/// use facsimile::{Equivalence, Equivalent};
///
/// #[derive(Equivalent)]
/// struct Tag {
///     #[key]
///     #[ignore_case]
///     #[hashed]
///     label: String,
///     #[hashed]
///     note: String,
/// }
///
/// let a = Tag { label: "Rust".into(), note: "one".into() };
/// let b = Tag { label: "rust".into(), note: "two".into() };
/// assert!(a.equivalent(&b));
/// ```
///
/// # Derive errors
///
/// At least one field must be a `#[key]`:
///
/// ```compile_fail
/// use facsimile::Equivalent;
///
/// #[derive(Equivalent)]
/// struct Unkeyed {
///     #[hashed]
///     label: String,
/// }
/// ```
///
/// `#[ignore_case]` only applies to a `#[key]` field:
///
/// ```compile_fail
/// use facsimile::Equivalent;
///
/// #[derive(Equivalent)]
/// struct Loose {
///     #[key]
///     id: u32,
///     #[ignore_case]
///     label: String,
/// }
/// ```
///
/// Markers take no arguments:
///
/// ```compile_fail
/// use facsimile::Equivalent;
///
/// #[derive(Equivalent)]
/// struct Strict {
///     #[key(strict)]
///     label: String,
/// }
/// ```
///
/// Only structs with named fields can derive it:
///
/// ```compile_fail
/// use facsimile::Equivalent;
///
/// #[derive(Equivalent)]
/// enum Label {
///     Short(String),
/// }
/// ```
///
/// ```compile_fail
/// use facsimile::Equivalent;
///
/// #[derive(Equivalent)]
/// struct Label(#[key] String);
/// ```
pub trait Equivalence {
    /// Whether the key fields of both values match.
    fn equivalent(&self, other: &Self) -> bool;

    /// Wrapping sum of the [`ContentHash`] of every hashed field.
    ///
    /// Nothing ties this to [`Equivalence::equivalent`]: when the hashed fields
    /// are not a subset of the key fields, equivalent values can disagree here.
    /// Use [`check_hash_contract`] to detect it.
    fn summed_hash(&self) -> i32;

    /// Feed the key fields into `state`, folded the same way they are compared.
    ///
    /// Equivalent values always feed identical input, so this is what a
    /// [`Hash`] impl should delegate to.
    fn key_hash<H: Hasher>(&self, state: &mut H);
}

/// Deterministic 32-bit hash of a field value.
///
/// Text hashes with the 31-polynomial over UTF-16 code units in wrapping
/// arithmetic, so values are stable across runs, platforms and processes.
pub trait ContentHash {
    fn content_hash(&self) -> i32;
}

impl ContentHash for str {
    fn content_hash(&self) -> i32 {
        let mut hash = 0i32;
        for unit in self.encode_utf16() {
            hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
        }
        hash
    }
}

impl ContentHash for String {
    fn content_hash(&self) -> i32 {
        self.as_str().content_hash()
    }
}

impl ContentHash for i32 {
    fn content_hash(&self) -> i32 {
        *self
    }
}

impl ContentHash for i64 {
    fn content_hash(&self) -> i32 {
        (*self ^ ((*self as u64) >> 32) as i64) as i32
    }
}

impl ContentHash for bool {
    fn content_hash(&self) -> i32 {
        if *self {
            1231
        } else {
            1237
        }
    }
}

impl ContentHash for char {
    fn content_hash(&self) -> i32 {
        *self as i32
    }
}

impl<T: ContentHash> ContentHash for Option<T> {
    fn content_hash(&self) -> i32 {
        self.as_ref().map_or(0, ContentHash::content_hash)
    }
}

impl<T: ContentHash + ?Sized> ContentHash for &T {
    fn content_hash(&self) -> i32 {
        (**self).content_hash()
    }
}

fn folded(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(char::to_lowercase)
}

/// Case-insensitive text comparison.
pub fn eq_ignore_case(a: &impl AsRef<str>, b: &impl AsRef<str>) -> bool {
    folded(a.as_ref()).eq(folded(b.as_ref()))
}

/// Hash text the way [`eq_ignore_case`] compares it.
pub fn hash_ignore_case<H: Hasher>(text: &impl AsRef<str>, state: &mut H) {
    for c in folded(text.as_ref()) {
        c.hash(state);
    }
    // Terminator, as `str` does, so adjacent fields cannot run together.
    state.write_u8(0xff);
}

/// Type-tagged comparison against a value of unknown type.
///
/// A value of any type other than `T` is simply not equivalent.
pub fn equivalent_any<T: Equivalence + Any>(a: &T, b: &dyn Any) -> bool {
    b.downcast_ref::<T>().map_or(false, |b| a.equivalent(b))
}

/// Like [`equivalent_any`], but reports a type mismatch as an error.
///
/// # Errors
///
/// Returns [`FacsimileError::TypeMismatch`] when `b` is not a `T`.
pub fn try_equivalent_any<T: Equivalence + Any>(a: &T, b: &dyn Any) -> FacsimileResult<bool> {
    b.downcast_ref::<T>()
        .map(|b| a.equivalent(b))
        .ok_or(FacsimileError::TypeMismatch {
            expected: type_name::<T>(),
        })
}

/// Equivalent values whose [`Equivalence::summed_hash`] disagree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("equivalent values hash to {left} and {right}")]
pub struct HashContractViolation {
    pub left: i32,
    pub right: i32,
}

/// Check the equal-values-have-equal-hashes law for one pair.
pub fn check_hash_contract<T: Equivalence>(a: &T, b: &T) -> Result<(), HashContractViolation> {
    if !a.equivalent(b) {
        return Ok(());
    }

    let (left, right) = (a.summed_hash(), b.summed_hash());
    if left == right {
        Ok(())
    } else {
        tracing::warn!(left, right, "hash contract violated by equivalent values");
        Err(HashContractViolation { left, right })
    }
}

/// Three text attributes, equivalent on `a` alone (ignoring case).
///
/// [`Equivalence::summed_hash`] sums all three attributes and therefore breaks
/// the hash contract for values that differ only in `b` or `c`. The [`Hash`]
/// impl goes through [`Equivalence::key_hash`] and is safe for hashed
/// collections.
#[derive(Debug, Clone, Equivalent)]
pub struct Triple {
    #[key]
    #[ignore_case]
    #[hashed]
    a: String,
    #[hashed]
    b: String,
    #[hashed]
    c: String,
}

impl Triple {
    pub fn new(a: impl Into<String>, b: impl Into<String>, c: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            c: c.into(),
        }
    }

    pub fn a(&self) -> &str {
        &self.a
    }

    pub fn b(&self) -> &str {
        &self.b
    }

    pub fn c(&self) -> &str {
        &self.c
    }
}

impl PartialEq for Triple {
    fn eq(&self, other: &Self) -> bool {
        self.equivalent(other)
    }
}

impl Eq for Triple {}

impl Hash for Triple {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key_hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    use super::*;

    fn std_hash<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn only_a_is_compared() {
        let left = Triple::new("X", "1", "2");
        let right = Triple::new("x", "9", "9");

        assert!(left.equivalent(&right));
        assert_eq!(left, right);
        assert_ne!(left, Triple::new("y", "1", "2"));
    }

    #[test]
    fn summed_hash_adds_all_fields() {
        // 'X' = 88, '1' = 49, '2' = 50
        assert_eq!(Triple::new("X", "1", "2").summed_hash(), 187);
        // 'x' = 120, '9' = 57
        assert_eq!(Triple::new("x", "9", "9").summed_hash(), 234);
    }

    #[test]
    fn text_hash_is_polynomial() {
        assert_eq!("".content_hash(), 0);
        assert_eq!("ab".content_hash(), 97 * 31 + 98);
        assert_eq!("hello".content_hash(), 99162322);
        assert_eq!(Some("ab").content_hash(), "ab".content_hash());
        assert_eq!(None::<String>.content_hash(), 0);
    }

    #[test]
    fn hash_contract_violation_is_flagged() {
        let left = Triple::new("X", "1", "2");
        let right = Triple::new("x", "9", "9");

        assert_eq!(
            check_hash_contract(&left, &right),
            Err(HashContractViolation {
                left: 187,
                right: 234
            })
        );

        // Not equivalent, so nothing to violate.
        let unrelated = Triple::new("y", "9", "9");
        assert!(check_hash_contract(&left, &unrelated).is_ok());
        // Same b and c, same case-sensitive a: hashes agree.
        let twin = Triple::new("X", "1", "2");
        assert!(check_hash_contract(&left, &twin).is_ok());
    }

    #[test]
    fn std_hash_respects_equality() {
        let left = Triple::new("Hello", "1", "2");
        let right = Triple::new("hELLO", "3", "4");

        assert_eq!(std_hash(&left), std_hash(&right));

        let set: HashSet<Triple> = [left, right, Triple::new("other", "", "")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn mismatched_type_is_not_equivalent() {
        let triple = Triple::new("X", "1", "2");

        assert!(!equivalent_any(&triple, &"X".to_owned()));
        assert!(equivalent_any(&triple, &Triple::new("x", "", "")));

        assert!(matches!(
            try_equivalent_any(&triple, &42_i32),
            Err(FacsimileError::TypeMismatch { .. })
        ));
        let lower = Triple::new("x", "", "");
        assert!(try_equivalent_any(&triple, &lower).unwrap());
    }

    #[test]
    fn ignore_case_handles_unicode() {
        assert!(eq_ignore_case(&"STRASSE", &"strasse"));
        assert!(eq_ignore_case(&"ÀÉÎ", &"àéî"));
        assert!(!eq_ignore_case(&"abc", &"abcd"));
    }
}
