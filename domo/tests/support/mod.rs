#![allow(dead_code)]

use chrono::{DateTime, Utc};
use domo::DomoRecord;

#[derive(DomoRecord)]
pub struct DomoSample {
    #[domo("")]
    pub foo: String,
    #[domo("bar")]
    pub bar: i32,
    #[domo("baz,Baz")]
    pub baz: f64,
    #[domo("-")]
    pub ignore_foo_bar: String,
    #[domo(tag = "BazBar")]
    pub baz_bar: i64,
    #[domo("obar,omitempty")]
    pub optional_bar: Option<i32>,
    #[domo("obaz, omitempty")]
    pub optional_baz: Option<f32>,
}

#[derive(DomoRecord)]
pub struct DomoNestedSample {
    #[domo("DECIMAL")]
    pub blah: f64,
    #[domo("firstBlahDay,DATE")]
    pub first_blah_day: DateTime<Utc>,
    #[domo = "firstBlahTime"]
    pub first_blah_time: DateTime<Utc>,
    // No "sample" column, but its fields still come through.
    #[domo("-")]
    pub sample: DomoSample,
}

#[derive(DomoRecord)]
pub struct DomoEmbeddedSample {
    #[domo("DECIMAL")]
    pub blah: f64,
    #[domo("firstBlahDay,DATE")]
    pub first_blah_day: DateTime<Utc>,
    #[domo("firstBlahTime")]
    pub first_blah_time: DateTime<Utc>,
    #[domo(embed)]
    pub sample: DomoSample,
}

pub const SAMPLE_NAMES: [&str; 6] = ["foo", "bar", "baz", "BazBar", "obar", "obaz"];

pub const EMBEDDED_NAMES: [&str; 9] = [
    "blah",
    "firstBlahDay",
    "firstBlahTime",
    "foo",
    "bar",
    "baz",
    "BazBar",
    "obar",
    "obaz",
];
