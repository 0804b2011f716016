// Symphonia
// Copyright (c) 2019-2026 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `rewrite` module owns the in-place-vs-full-rewrite decision shared by every container
//! writer, plus the checkpoint/cancellation plumbing used while executing whichever plan was
//! chosen.
//!
//! Each container crate computes the numbers this module needs (the new metadata region's size,
//! how much padding is available to absorb a size delta) and is responsible for the
//! container-specific mechanics of actually carrying out a plan: patching `stco`/`co64`,
//! recomputing a Matroska `SeekHead`, relocating `moov`, and so on. This module only decides which
//! strategy applies and drives progress/cancellation checkpoints around it.

use crate::diagnostics::ProgressFeedback;
use crate::errors::{aborted_error, Result};

/// A region of a container that may absorb a size delta without displacing any subsequent
/// element: an MP4 `free` atom, a Matroska `Void` element, a FLAC `PADDING` block, or an ID3v2
/// tag's trailing padding zone.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PaddingRegion {
    /// Byte offset of the region within the container.
    pub offset: u64,
    /// Size of the region in bytes.
    pub size: u64,
}

/// The inputs a container crate supplies to decide between an in-place and a full rewrite.
#[derive(Copy, Clone, Debug)]
pub struct RewriteInput {
    /// The size, in bytes, of the new metadata region once all pending edits are serialized.
    pub new_metadata_size: u64,
    /// The size, in bytes, of the existing metadata region being replaced.
    pub old_metadata_size: u64,
    /// The largest contiguous padding region available to absorb a size increase, if any.
    pub available_padding: Option<PaddingRegion>,
}

/// The chosen rewrite strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RewritePlan {
    /// The edit fits within the existing metadata region, or within existing metadata plus an
    /// available padding region, without displacing any subsequent element. The new metadata is
    /// written at `offset`, and if it is smaller than the space it occupies, the remainder is
    /// converted to (or kept as) a padding region.
    InPlace {
        /// Byte offset at which to write the new metadata region.
        offset: u64,
        /// Total space available at `offset` for the new metadata plus any leftover padding.
        space: u64,
    },
    /// The edit does not fit; the entire container must be streamed to a temporary file with the
    /// new metadata region emitted at its preferred position, then atomically swapped into place.
    Full,
}

/// Decide between an in-place and a full rewrite, given what a container crate has computed.
///
/// Criteria for `InPlace`: the new metadata fits within the old metadata region, or within the old
/// region plus the single largest available padding region, with no other element needing to
/// move.
pub fn plan_rewrite(input: RewriteInput) -> RewritePlan {
    if input.new_metadata_size <= input.old_metadata_size {
        return RewritePlan::InPlace { offset: 0, space: input.old_metadata_size };
    }

    if let Some(padding) = input.available_padding {
        let space = input.old_metadata_size + padding.size;
        if input.new_metadata_size <= space {
            return RewritePlan::InPlace { offset: 0, space };
        }
    }

    RewritePlan::Full
}

/// Drives progress reporting and cancellation checks around the fixed set of checkpoints a
/// rewrite passes through: before each top-level element is copied, after the new metadata region
/// is written, and between each chunk/offset-table patch. A cancellation observed at any
/// checkpoint aborts with `OperationAborted`; no partial output is left behind (the caller is
/// expected to have been writing to a temporary file that it discards on error).
pub struct RewriteCheckpoints<'a> {
    feedback: &'a mut dyn ProgressFeedback,
    total_steps: u32,
    steps_done: u32,
}

impl<'a> RewriteCheckpoints<'a> {
    /// Create a new checkpoint driver for an operation with `total_steps` checkpoints.
    pub fn new(feedback: &'a mut dyn ProgressFeedback, total_steps: u32) -> Self {
        RewriteCheckpoints { feedback, total_steps, steps_done: 0 }
    }

    /// Report arrival at a checkpoint labeled `step`, then check for cancellation.
    ///
    /// Returns `OperationAborted` if the caller's `ProgressFeedback` has requested cancellation;
    /// the caller must discard any temporary output and leave the original file untouched.
    pub fn checkpoint(&mut self, step: &str) -> Result<()> {
        let percent = if self.total_steps == 0 {
            100
        }
        else {
            ((u64::from(self.steps_done) * 100) / u64::from(self.total_steps)) as u8
        };

        self.feedback.on_progress(percent, step);
        self.steps_done = self.steps_done.saturating_add(1);

        if self.feedback.is_cancelled() {
            return aborted_error();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NullProgress;

    #[test]
    fn shrink_or_equal_fits_in_place() {
        let plan = plan_rewrite(RewriteInput {
            new_metadata_size: 100,
            old_metadata_size: 128,
            available_padding: None,
        });
        assert_eq!(plan, RewritePlan::InPlace { offset: 0, space: 128 });
    }

    #[test]
    fn growth_within_padding_fits_in_place() {
        let plan = plan_rewrite(RewriteInput {
            new_metadata_size: 200,
            old_metadata_size: 128,
            available_padding: Some(PaddingRegion { offset: 128, size: 100 }),
        });
        assert_eq!(plan, RewritePlan::InPlace { offset: 0, space: 228 });
    }

    #[test]
    fn growth_beyond_padding_requires_full_rewrite() {
        let plan = plan_rewrite(RewriteInput {
            new_metadata_size: 500,
            old_metadata_size: 128,
            available_padding: Some(PaddingRegion { offset: 128, size: 100 }),
        });
        assert_eq!(plan, RewritePlan::Full);
    }

    #[test]
    fn cancellation_aborts_at_checkpoint() {
        struct AlwaysCancel;
        impl ProgressFeedback for AlwaysCancel {
            fn on_progress(&mut self, _percent: u8, _step: &str) {}
            fn is_cancelled(&mut self) -> bool {
                true
            }
        }

        let mut fb = AlwaysCancel;
        let mut checkpoints = RewriteCheckpoints::new(&mut fb, 4);
        assert!(checkpoints.checkpoint("copy moov").is_err());
    }

    #[test]
    fn no_cancellation_proceeds() {
        let mut fb = NullProgress;
        let mut checkpoints = RewriteCheckpoints::new(&mut fb, 2);
        assert!(checkpoints.checkpoint("copy mdat").is_ok());
        assert!(checkpoints.checkpoint("write tag region").is_ok());
    }
}
