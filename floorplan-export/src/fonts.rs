//! Font database shared by the raster and PDF paths, so both resolve the
//! same faces.

use std::sync::Arc;

use usvg::fontdb::Database;

/// Make the first loaded face the sans-serif family, so labels render even
/// without a fontconfig alias. Returns the family chosen, if any.
pub fn alias_sans_serif(fontdb: &mut Database) -> Option<String> {
    let family_name = {
        let mut it = fontdb.faces();
        if let Some(face) = it.next() {
            face.families.first().map(|(n, _)| n.clone())
        } else {
            None
        }
    };
    if let Some(name) = &family_name {
        fontdb.set_sans_serif_family(name.clone());
    }
    family_name
}

/// System fonts with the sans-serif alias applied.
pub fn system_fontdb() -> Arc<Database> {
    let mut fontdb = Database::new();
    fontdb.load_system_fonts();
    alias_sans_serif(&mut fontdb);
    Arc::new(fontdb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use usvg::fontdb::Family;

    #[test]
    fn empty_database_keeps_its_default_alias() {
        let mut db = Database::new();
        let before = db.family_name(&Family::SansSerif).to_string();
        assert_eq!(alias_sans_serif(&mut db), None);
        assert_eq!(db.family_name(&Family::SansSerif), before);
    }

    #[test]
    fn sans_serif_resolves_to_the_first_face() {
        let db = system_fontdb();
        if let Some(face) = db.faces().next() {
            assert_eq!(db.family_name(&Family::SansSerif), face.families[0].0);
        }
    }
}
