/// How a discovered installer folder is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// A DLC installer this tool can merge.
    Supported,
    /// Looks like an installer but can't be merged; the operator is warned.
    Unsupported(UnsupportedReason),
    /// Not relevant to this installation; skipped without a message.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedReason {
    /// The new unified package format, which needs a manual install.
    NewPackageFormat,
    /// Contains a content manifest but matches no known naming convention.
    UnknownLayout,
}

enum Pattern {
    Exact(&'static [&'static str]),
    Prefix(&'static [&'static str]),
    PrefixExcluding {
        prefix: &'static str,
        exclude: &'static str,
    },
}

impl Pattern {
    fn matches(&self, name: &str) -> bool {
        match self {
            Pattern::Exact(names) => names.contains(&name),
            Pattern::Prefix(prefixes) => prefixes.iter().any(|p| name.starts_with(p)),
            Pattern::PrefixExcluding { prefix, exclude } => {
                name != *exclude && name.starts_with(prefix)
            }
        }
    }
}

/// Naming conventions for folders that ship a content manifest, evaluated
/// top to bottom, first match wins. Order matters: several patterns are
/// prefixes of later ones.
const RULES: &[(Pattern, Classification)] = &[
    // Companion folders bundled next to the installers; nothing to merge.
    (
        Pattern::Exact(&["cm3d2", "common"]),
        Classification::Ignored,
    ),
    // The new unified package format. Must be checked before the com3d2
    // prefix rule below.
    (
        Pattern::Exact(&["com3d2"]),
        Classification::Unsupported(UnsupportedReason::NewPackageFormat),
    ),
    // CM3D2 "Oh!" plugin combos bundled with COM3D2 releases; they target
    // the sibling game. Must be checked before the cm3d2plg_ rule.
    (
        Pattern::Prefix(&["cm3d2plg_oh_"]),
        Classification::Ignored,
    ),
    // Installers for the older sibling product.
    (
        Pattern::Prefix(&["cm3d2plg_", "cm3d2_"]),
        Classification::Ignored,
    ),
    // One early combo release that predates the com3d2 naming scheme but
    // uses the same folder layout.
    (
        Pattern::Exact(&["oh_com3d2plg"]),
        Classification::Supported,
    ),
    (
        Pattern::PrefixExcluding {
            prefix: "com3d2",
            exclude: "com3d2",
        },
        Classification::Supported,
    ),
];

/// Classifies an installer folder by name. Matching is case-insensitive.
///
/// Callers are expected to consult this only for directories that actually
/// contain a content manifest; anything else is not an installer folder.
pub fn classify(folder_name: &str) -> Classification {
    let name = folder_name.to_ascii_lowercase();
    for (pattern, classification) in RULES {
        if pattern.matches(&name) {
            return *classification;
        }
    }
    Classification::Unsupported(UnsupportedReason::UnknownLayout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dlc_installer_is_supported() {
        assert_eq!(classify("com3d2plg_dlc001"), Classification::Supported);
        assert_eq!(classify("com3d2_dlc_partyset"), Classification::Supported);
    }

    #[test]
    fn test_new_package_format_warns() {
        assert_eq!(
            classify("com3d2"),
            Classification::Unsupported(UnsupportedReason::NewPackageFormat)
        );
    }

    #[test]
    fn test_sibling_game_plugin_combo_is_ignored() {
        assert_eq!(classify("cm3d2plg_oh_x"), Classification::Ignored);
    }

    #[test]
    fn test_alternate_product_installers_are_ignored() {
        assert_eq!(classify("cm3d2plg_dlc114"), Classification::Ignored);
        assert_eq!(classify("cm3d2_update140"), Classification::Ignored);
    }

    #[test]
    fn test_companion_folders_are_ignored() {
        assert_eq!(classify("cm3d2"), Classification::Ignored);
        assert_eq!(classify("common"), Classification::Ignored);
    }

    #[test]
    fn test_legacy_combo_folder_is_supported() {
        assert_eq!(classify("oh_com3d2plg"), Classification::Supported);
    }

    #[test]
    fn test_unknown_layout_warns() {
        assert_eq!(
            classify("somegame_dlc"),
            Classification::Unsupported(UnsupportedReason::UnknownLayout)
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(classify("COM3D2PLG_DLC001"), Classification::Supported);
        assert_eq!(
            classify("COM3D2"),
            Classification::Unsupported(UnsupportedReason::NewPackageFormat)
        );
    }

    // The oh_ combo prefix extends the generic cm3d2plg_ prefix; the longer
    // pattern has to win.
    #[test]
    fn test_rule_precedence() {
        assert_eq!(classify("cm3d2plg_oh_dlc001"), Classification::Ignored);
        assert_eq!(classify("cm3d2plg_dlc001"), Classification::Ignored);
    }
}
