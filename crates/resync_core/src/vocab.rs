//! The ResourceSync wire vocabulary: namespaces, capability and relation
//! strings, and the fixed timestamp format.
//!
//! The model stores all of these as open strings; nothing here is a closed
//! type the projection branches on. The constants exist so callers do not
//! scatter literals.

use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

// ---------------------------------------------------------------------------
// Namespaces
// ---------------------------------------------------------------------------
/// The sitemap namespace, unprefixed (default) in serialized documents.
pub const NS_SITEMAP: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// The ResourceSync terms namespace, bound to the `rs` prefix.
pub const NS_RS: &str = "http://www.openarchives.org/rs/terms/";

/// Prefix used for [`NS_RS`] in serialized documents.
pub const RS_PREFIX: &str = "rs";

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------
pub const CAPABILITY_DESCRIPTION: &str = "description";
pub const CAPABILITY_CAPABILITYLIST: &str = "capabilitylist";
pub const CAPABILITY_RESOURCELIST: &str = "resourcelist";
pub const CAPABILITY_RESOURCEDUMP: &str = "resourcedump";
pub const CAPABILITY_CHANGELIST: &str = "changelist";
pub const CAPABILITY_CHANGEDUMP: &str = "changedump";

/// Whether a capability describes changes over a time window, which is
/// where the `until` attribute carries meaning.
pub fn is_change_capability(capability: &str) -> bool {
    matches!(capability, CAPABILITY_CHANGELIST | CAPABILITY_CHANGEDUMP)
}

// ---------------------------------------------------------------------------
// Change kinds
// ---------------------------------------------------------------------------
pub const CHANGE_CREATED: &str = "created";
pub const CHANGE_UPDATED: &str = "updated";
pub const CHANGE_DELETED: &str = "deleted";

// ---------------------------------------------------------------------------
// Change frequencies (sitemap changefreq values)
// ---------------------------------------------------------------------------
pub const FREQ_ALWAYS: &str = "always";
pub const FREQ_HOURLY: &str = "hourly";
pub const FREQ_DAILY: &str = "daily";
pub const FREQ_WEEKLY: &str = "weekly";
pub const FREQ_MONTHLY: &str = "monthly";
pub const FREQ_YEARLY: &str = "yearly";
pub const FREQ_NEVER: &str = "never";

// ---------------------------------------------------------------------------
// Link relations
// ---------------------------------------------------------------------------
pub const REL_DESCRIBES: &str = "describes";
pub const REL_DESCRIBED_BY: &str = "describedby";
pub const REL_COLLECTION: &str = "collection";
pub const REL_UP: &str = "up";
pub const REL_INDEX: &str = "index";
pub const REL_CONTENTS: &str = "contents";
pub const REL_DUPLICATE: &str = "duplicate";
pub const REL_MIRROR: &str = "mirror";

// ---------------------------------------------------------------------------
// Hash algorithm identifiers
// ---------------------------------------------------------------------------
pub const HASH_MD5: &str = "md5";
pub const HASH_SHA_256: &str = "sha-256";

/// Algorithm identifiers the validation layer treats as well known.
pub const KNOWN_HASH_ALGORITHMS: &[&str] = &[HASH_MD5, HASH_SHA_256];

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------
// Wire-compatibility requirement: yyyy-MM-dd'T'HH:mm:ss'Z', always UTC,
// never fractional seconds.

/// Render a timestamp in the fixed ResourceSync form.
///
/// Infallible: the wire format is fixed-width and every `OffsetDateTime`
/// has a UTC rendering, so projection never fails on a timestamp.
pub fn format_timestamp(ts: OffsetDateTime) -> String {
    let utc = ts.to_offset(UtcOffset::UTC);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        utc.year(),
        u8::from(utc.month()),
        utc.day(),
        utc.hour(),
        utc.minute(),
        utc.second()
    )
}

/// Parse a timestamp in the fixed ResourceSync form, interpreted as UTC.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, time::error::Parse> {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");
    PrimitiveDateTime::parse(value, format).map(|dt| dt.assume_utc())
}
