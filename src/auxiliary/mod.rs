//! Helper items to assist the working of RFZSampler.

pub mod geometry;
