//! Reference names and fixed values of the support-ticket taxonomy.

/// Work item title field.
pub const TITLE: &str = "System.Title";

/// Work item description field (HTML).
pub const DESCRIPTION: &str = "System.Description";

/// Area path classification field.
pub const AREA_PATH: &str = "System.AreaPath";

/// Team project field.
pub const TEAM_PROJECT: &str = "System.TeamProject";

/// Discussion history field; writing to it appends a comment.
pub const HISTORY: &str = "System.History";

/// Custom HTML blob holding customer details, including the portal link.
pub const CUSTOMER_DETAILS: &str = "Custom.CTRM_CustomerDetails";

/// Area path of first-line support tickets that may be escalated.
pub const SUPPORT_AREA_PATH: &str = r"CTRM\Customer Support Center\Kundenportal\Kundenportalsupport";

/// Area path of the second-line team receiving escalations.
pub const SECOND_LINE_AREA_PATH: &str = r"CTRM\Customer Support Center\Kundenportal\Product Owner";

/// Work item type created by an escalation.
pub const ISSUE_TYPE: &str = "Issue";

/// Link kind pointing from a child to its parent.
pub const HIERARCHY_REVERSE: &str = "System.LinkTypes.Hierarchy-Reverse";
