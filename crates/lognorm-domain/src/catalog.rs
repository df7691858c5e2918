//! Built-in OCSF 1.x reference data
//!
//! Values follow the published OCSF event catalog (https://schema.ocsf.io/).
//! Update this module when targeting a new OCSF version; scoring code reads
//! these tables only through [`crate::SchemaReference`].

/// `type_uid = class_uid * TYPE_UID_MULTIPLIER + activity_id`
///
/// Example: Network Activity (4001) + Traffic (5) = 400105
pub const TYPE_UID_MULTIPLIER: i64 = 100;

/// Fields every OCSF event must carry, regardless of class
pub const BASE_REQUIRED_FIELDS: &[&str] = &["class_uid", "class_name", "metadata"];

/// Valid event classes: (class_uid, class_name)
pub const EVENT_CLASSES: &[(i64, &str)] = &[
    // System Activity (category_uid 1)
    (1001, "File System Activity"),
    (1002, "Kernel Extension Activity"),
    (1003, "Kernel Activity"),
    (1004, "Memory Activity"),
    (1005, "Module Activity"),
    (1006, "Scheduled Job Activity"),
    (1007, "Process Activity"),
    (1008, "Event Log Activity"),
    (1009, "Script Activity"),
    (1010, "Peripheral Activity"),
    // Findings (category_uid 2)
    (2002, "Vulnerability Finding"),
    (2003, "Compliance Finding"),
    (2004, "Detection Finding"),
    (2005, "Incident Finding"),
    (2006, "Data Security Finding"),
    (2007, "Application Security Posture Finding"),
    (2008, "IAM Analysis Finding"),
    // Identity & Access Management (category_uid 3)
    (3001, "Account Change"),
    (3002, "Authentication"),
    (3003, "Authorize Session"),
    (3004, "Entity Management"),
    (3005, "User Access Management"),
    (3006, "Group Management"),
    // Network Activity (category_uid 4)
    (4001, "Network Activity"),
    (4002, "HTTP Activity"),
    (4003, "DNS Activity"),
    (4004, "DHCP Activity"),
    (4005, "RDP Activity"),
    (4006, "SMB Activity"),
    (4007, "SSH Activity"),
    (4008, "FTP Activity"),
    (4009, "Email Activity"),
    (4013, "NTP Activity"),
    (4014, "Tunnel Activity"),
    // Discovery (category_uid 5)
    (5001, "Device Inventory Info"),
    (5003, "User Inventory Info"),
    (5004, "Operating System Patch State"),
    (5019, "Device Config State Change"),
    (5020, "Software Inventory Info"),
    (5021, "OSINT Inventory Info"),
    (5023, "Cloud Resources Inventory Info"),
    (5040, "Live Evidence Info"),
    // Application Activity (category_uid 6)
    (6001, "Web Resources Activity"),
    (6002, "Application Lifecycle"),
    (6003, "API Activity"),
    (6005, "Datastore Activity"),
    (6006, "File Hosting Activity"),
    (6007, "Scan Activity"),
    (6008, "Application Error"),
    // Remediation (category_uid 7)
    (7001, "Remediation Activity"),
    (7002, "File Remediation Activity"),
    (7003, "Process Remediation Activity"),
    (7004, "Network Remediation Activity"),
];

/// Valid `severity_id` values: (id, label)
pub const SEVERITY_LEVELS: &[(i64, &str)] = &[
    (0, "Unknown"),
    (1, "Informational"),
    (2, "Low"),
    (3, "Medium"),
    (4, "High"),
    (5, "Critical"),
    (6, "Fatal"),
    (99, "Other"),
];

/// Class-specific required fields: (class_uid, fields)
pub const CLASS_REQUIRED_FIELDS: &[(i64, &[&str])] = &[
    (1001, &["file"]),
    (1007, &["process"]),
    (2004, &["finding_info"]),
    (3002, &["user"]),
    (3003, &["user"]),
    (4001, &["src_endpoint", "dst_endpoint"]),
    (4002, &["http_request"]),
    (4003, &["query"]),
    (4004, &["src_endpoint"]),
    (4006, &["src_endpoint", "dst_endpoint"]),
];

/// Look up the required fields for a class in the built-in table
pub fn required_fields_for(class_uid: i64) -> Option<&'static [&'static str]> {
    CLASS_REQUIRED_FIELDS
        .iter()
        .find(|(uid, _)| *uid == class_uid)
        .map(|(_, fields)| *fields)
}
