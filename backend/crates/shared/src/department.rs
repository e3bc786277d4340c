//! Department Enumeration
//!
//! The closed set of departments shared by signup validation, report
//! submission and the leader dashboards.
//!
//! Each department has three spellings:
//! - display name (`"Media Dept"`), used in JSON
//! - short name (`"Media"`), accepted on input
//! - slug (`"media"`), used for storage and URLs

use std::fmt;
use std::str::FromStr;

use crate::error::app_error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Department {
    Parcel,
    Media,
    IeltsMasterclass,
    ExpressCv,
    JobApplication,
    IeltsBooking,
    TravelTour,
    Osce,
    CustomerService,
    Nclex,
    Marketing,
    It,
}

impl Department {
    pub const ALL: [Department; 12] = [
        Department::Parcel,
        Department::Media,
        Department::IeltsMasterclass,
        Department::ExpressCv,
        Department::JobApplication,
        Department::IeltsBooking,
        Department::TravelTour,
        Department::Osce,
        Department::CustomerService,
        Department::Nclex,
        Department::Marketing,
        Department::It,
    ];

    pub const fn short_name(&self) -> &'static str {
        match self {
            Department::Parcel => "Parcel",
            Department::Media => "Media",
            Department::IeltsMasterclass => "IELTS Masterclass",
            Department::ExpressCv => "Express CV",
            Department::JobApplication => "Job Application",
            Department::IeltsBooking => "IELTS Booking",
            Department::TravelTour => "Travel/Tour",
            Department::Osce => "OSCE",
            Department::CustomerService => "Customer Service",
            Department::Nclex => "NCLEX",
            Department::Marketing => "Marketing",
            Department::It => "IT",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Department::Parcel => "Parcel Dept",
            Department::Media => "Media Dept",
            Department::IeltsMasterclass => "IELTS Masterclass Dept",
            Department::ExpressCv => "Express CV Dept",
            Department::JobApplication => "Job Application Dept",
            Department::IeltsBooking => "IELTS Booking Dept",
            Department::TravelTour => "Travel/Tour Dept",
            Department::Osce => "OSCE Dept",
            Department::CustomerService => "Customer Service Dept",
            Department::Nclex => "NCLEX Dept",
            Department::Marketing => "Marketing Dept",
            Department::It => "IT Dept",
        }
    }

    pub const fn slug(&self) -> &'static str {
        match self {
            Department::Parcel => "parcel",
            Department::Media => "media",
            Department::IeltsMasterclass => "ielts-masterclass",
            Department::ExpressCv => "express-cv",
            Department::JobApplication => "job-application",
            Department::IeltsBooking => "ielts-booking",
            Department::TravelTour => "travel-tour",
            Department::Osce => "osce",
            Department::CustomerService => "customer-service",
            Department::Nclex => "nclex",
            Department::Marketing => "marketing",
            Department::It => "it",
        }
    }

    /// Strict lookup by slug, for values read back from storage
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.slug() == slug)
    }

    /// Landing page of a leader of this department
    pub fn leader_landing_path(&self) -> String {
        format!("/leaders/{}", self.slug())
    }
}

impl FromStr for Department {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| {
                needle.eq_ignore_ascii_case(d.display_name())
                    || needle.eq_ignore_ascii_case(d.short_name())
                    || needle.eq_ignore_ascii_case(d.slug())
            })
            .ok_or_else(|| AppError::bad_request(format!("Unknown department: {}", needle)))
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl serde::Serialize for Department {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

impl<'de> serde::Deserialize<'de> for Department {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|e: AppError| serde::de::Error::custom(e.message().to_string()))
    }
}
