//! Localized message templates.
//!
//! Templates use positional `{0}`, `{1}` placeholders. Every [`MessageKey`] has an
//! entry in every bundled [`Locale`], so lookups never fail.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    /// Accepts `en`, `fr` and region-qualified tags such as `fr-FR` or `en_US`.
    pub fn parse(raw: &str) -> Option<Self> {
        let language = raw
            .trim()
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    SectorNotFound,
    SectorNotFoundByName,
    SectorDuplicate,
    ClassNotFound,
    ClassNotFoundByName,
    SectorNameRequired,
    SectorNameTooLong,
    ClassNameRequired,
    ClassNameTooLong,
    ClassDescriptionRequired,
    ClassDescriptionTooLong,
    ClassSectorRequired,
    SectorCreated,
    SectorUpdated,
    SectorDeleted,
    SectorSaveFailed,
    ClassCreated,
    ClassUpdated,
    ClassDeleted,
    ClassCreateFailed,
    ClassUpdateFailed,
    PageSectors,
    PageSectorAdd,
    PageSectorEdit,
    PageClasses,
    PageClassAdd,
    PageClassEdit,
    LabelName,
    LabelClass,
    LabelClassName,
    LabelDescription,
    LabelSector,
    ActionSave,
    ActionCancel,
    ActionEdit,
    ActionDelete,
}

impl MessageKey {
    /// Property-style key, used in logs and API error payloads.
    pub fn code(self) -> &'static str {
        match self {
            Self::SectorNotFound => "sector.notfound",
            Self::SectorNotFoundByName => "sector.notfound.byName",
            Self::SectorDuplicate => "sector.duplicate",
            Self::ClassNotFound => "classe.notfound",
            Self::ClassNotFoundByName => "classe.notfound.byName",
            Self::SectorNameRequired => "sector.name.required",
            Self::SectorNameTooLong => "sector.name.tooLong",
            Self::ClassNameRequired => "classe.className.required",
            Self::ClassNameTooLong => "classe.className.tooLong",
            Self::ClassDescriptionRequired => "classe.description.required",
            Self::ClassDescriptionTooLong => "classe.description.tooLong",
            Self::ClassSectorRequired => "classe.idSector.required",
            Self::SectorCreated => "sector.created",
            Self::SectorUpdated => "sector.updated",
            Self::SectorDeleted => "sector.deleted",
            Self::SectorSaveFailed => "sector.save.failed",
            Self::ClassCreated => "classe.created",
            Self::ClassUpdated => "classe.updated",
            Self::ClassDeleted => "classe.deleted",
            Self::ClassCreateFailed => "classe.create.failed",
            Self::ClassUpdateFailed => "classe.update.failed",
            Self::PageSectors => "page.sectors",
            Self::PageSectorAdd => "page.sector.add",
            Self::PageSectorEdit => "page.sector.edit",
            Self::PageClasses => "page.classes",
            Self::PageClassAdd => "page.classe.add",
            Self::PageClassEdit => "page.classe.edit",
            Self::LabelName => "label.name",
            Self::LabelClass => "label.classe",
            Self::LabelClassName => "label.className",
            Self::LabelDescription => "label.description",
            Self::LabelSector => "label.sector",
            Self::ActionSave => "action.save",
            Self::ActionCancel => "action.cancel",
            Self::ActionEdit => "action.edit",
            Self::ActionDelete => "action.delete",
        }
    }

    fn template(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.english(),
            Locale::Fr => self.french(),
        }
    }

    fn english(self) -> &'static str {
        match self {
            Self::SectorNotFound => "Sector {0} not found",
            Self::SectorNotFoundByName => "No sector named '{0}'",
            Self::SectorDuplicate => "A sector named '{0}' already exists",
            Self::ClassNotFound => "Class {0} not found",
            Self::ClassNotFoundByName => "No class named '{0}'",
            Self::SectorNameRequired => "Sector name must not be empty",
            Self::SectorNameTooLong => "Sector name must be at most {0} characters",
            Self::ClassNameRequired => "Class name must not be empty",
            Self::ClassNameTooLong => "Class name must be at most {0} characters",
            Self::ClassDescriptionRequired => "Description must not be empty",
            Self::ClassDescriptionTooLong => "Description must be at most {0} characters",
            Self::ClassSectorRequired => "A sector must be selected",
            Self::SectorCreated => "Sector created successfully!",
            Self::SectorUpdated => "Sector updated successfully!",
            Self::SectorDeleted => "Sector deleted successfully!",
            Self::SectorSaveFailed => "An error occurred while saving the sector: {0}",
            Self::ClassCreated => "Class created successfully!",
            Self::ClassUpdated => "Class updated successfully!",
            Self::ClassDeleted => "Class deleted successfully!",
            Self::ClassCreateFailed => "An error occurred while adding the class: {0}",
            Self::ClassUpdateFailed => "An error occurred while updating the class: {0}",
            Self::PageSectors => "Sectors",
            Self::PageSectorAdd => "Add a sector",
            Self::PageSectorEdit => "Edit sector",
            Self::PageClasses => "Classes",
            Self::PageClassAdd => "Add a class",
            Self::PageClassEdit => "Edit class",
            Self::LabelName => "Name",
            Self::LabelClass => "Class",
            Self::LabelClassName => "Class name",
            Self::LabelDescription => "Description",
            Self::LabelSector => "Sector",
            Self::ActionSave => "Save",
            Self::ActionCancel => "Cancel",
            Self::ActionEdit => "Edit",
            Self::ActionDelete => "Delete",
        }
    }

    fn french(self) -> &'static str {
        match self {
            Self::SectorNotFound => "Secteur {0} introuvable",
            Self::SectorNotFoundByName => "Aucun secteur nommé '{0}'",
            Self::SectorDuplicate => "Un secteur nommé '{0}' existe déjà",
            Self::ClassNotFound => "Classe {0} introuvable",
            Self::ClassNotFoundByName => "Aucune classe nommée '{0}'",
            Self::SectorNameRequired => "Le nom du secteur ne peut pas être vide",
            Self::SectorNameTooLong => "Le nom du secteur ne peut dépasser {0} caractères",
            Self::ClassNameRequired => "Le nom de la classe ne peut pas être vide",
            Self::ClassNameTooLong => "Le nom de la classe ne peut dépasser {0} caractères",
            Self::ClassDescriptionRequired => "La description ne peut pas être vide",
            Self::ClassDescriptionTooLong => "La description ne peut dépasser {0} caractères",
            Self::ClassSectorRequired => "Un secteur doit être sélectionné",
            Self::SectorCreated => "Secteur ajouté avec succès !",
            Self::SectorUpdated => "Secteur modifié avec succès !",
            Self::SectorDeleted => "Secteur supprimé avec succès !",
            Self::SectorSaveFailed => "Une erreur est survenue lors de l'enregistrement : {0}",
            Self::ClassCreated => "Classe ajoutée avec succès !",
            Self::ClassUpdated => "Classe modifiée avec succès !",
            Self::ClassDeleted => "Classe supprimée avec succès !",
            Self::ClassCreateFailed => "Une erreur est survenue lors de l'ajout : {0}",
            Self::ClassUpdateFailed => "Une erreur est survenue lors de la modification : {0}",
            Self::PageSectors => "Secteurs",
            Self::PageSectorAdd => "Ajouter un secteur",
            Self::PageSectorEdit => "Modifier le secteur",
            Self::PageClasses => "Classes",
            Self::PageClassAdd => "Ajouter une classe",
            Self::PageClassEdit => "Modifier la classe",
            Self::LabelName => "Nom",
            Self::LabelClass => "Classe",
            Self::LabelClassName => "Nom de la classe",
            Self::LabelDescription => "Description",
            Self::LabelSector => "Secteur",
            Self::ActionSave => "Enregistrer",
            Self::ActionCancel => "Annuler",
            Self::ActionEdit => "Modifier",
            Self::ActionDelete => "Supprimer",
        }
    }
}

/// Renders [`MessageKey`] templates for one locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageCatalog {
    locale: Locale,
}

impl MessageCatalog {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn render(&self, key: MessageKey, args: &[&dyn fmt::Display]) -> String {
        substitute(key.template(self.locale), args)
    }

    pub fn text(&self, key: MessageKey) -> String {
        self.render(key, &[])
    }
}

fn substitute(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut rendered = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = after
            .find('}')
            .and_then(|close| after[..close].parse::<usize>().ok().map(|index| (index, close)));

        match placeholder {
            Some((index, close)) if index < args.len() => {
                rendered.push_str(&args[index].to_string());
                rest = &after[close + 1..];
            }
            _ => {
                rendered.push('{');
                rest = after;
            }
        }
    }
    rendered.push_str(rest);
    rendered
}
