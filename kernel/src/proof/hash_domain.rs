//! Typed domain separators for canonical hashing.
//!
//! Every digest selects a domain via [`HashDomain`]; this module is the only
//! place domain-separator byte strings are spelled out. The enum,
//! `as_bytes()`, `ALL`, and `Display` come from one macro invocation, so
//! adding a domain is a one-line change.

/// Expands one `Variant => b"BYTES"` list into `HashDomain` and its tables.
macro_rules! define_hash_domains {
    ($( $(#[$doc:meta])* $variant:ident => $bytes:expr ),+ $(,)?) => {
        /// Which digest a hash belongs to, selected at every
        /// [`super::hash::canonical_hash`] call.
        ///
        /// The separator bytes are unique and NUL-terminated, and are hashed
        /// ahead of the payload.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $( $(#[$doc])* $variant, )+
        }

        impl HashDomain {
            /// Every domain, in declaration order.
            pub const ALL: &[HashDomain] = &[$( Self::$variant ),+];

            /// Separator bytes hashed ahead of the payload.
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes ),+
                }
            }

            /// The variant name, for logs and error messages.
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($variant) ),+
                }
            }
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

define_hash_domains! {
    /// Prepared `SortedSequence` values.
    Sequence => b"BISECT::SEQUENCE::V1\0",

    /// A run's ordered step log on its own.
    StepLog => b"BISECT::STEP_LOG::V1\0",

    /// A full run record: sequence, target, steps, outcome.
    RunRecord => b"BISECT::RUN_RECORD::V1\0",

    /// Playback configuration snapshot.
    PlaybackConfig => b"BISECT::PLAYBACK_CONFIG::V1\0",

    /// Benchmark input guard.
    BenchInput => b"BISECT::BENCH_INPUT::V1\0",
}
