//! The fixed set of PND (Plan Nacional de Desarrollo 2022-2026) policy concepts.
//!
//! Every concept carries an ordered keyword list, used both to build the
//! search query and to confirm a post actually talks about the concept, and
//! a template triple used by the strategic plan and the campaign speech.

use serde::{Deserialize, Serialize};

/// Placeholder substituted with the target location in concept templates.
pub const LOCATION_PLACEHOLDER: &str = "{location}";

/// One of the ten public-policy topics posts are bucketed into.
///
/// Variant order is the canonical concept order used everywhere: query
/// issuance, report sections, chart labels and tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Concept {
    #[serde(rename = "seguridad")]
    Seguridad,
    #[serde(rename = "alimentacion")]
    Alimentacion,
    #[serde(rename = "infraestructura")]
    Infraestructura,
    #[serde(rename = "gobernanza y transparencia")]
    GobernanzaTransparencia,
    #[serde(rename = "igualdad y equidad")]
    IgualdadEquidad,
    #[serde(rename = "paz y reincorporación")]
    PazReincorporacion,
    #[serde(rename = "economía y empleo")]
    EconomiaEmpleo,
    #[serde(rename = "medio ambiente y cambio climático")]
    MedioAmbiente,
    #[serde(rename = "educación")]
    Educacion,
    #[serde(rename = "salud")]
    Salud,
}

/// Proposal, speech and impact text for one concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConceptTemplates {
    /// Policy proposal; contains [`LOCATION_PLACEHOLDER`].
    pub propuesta: &'static str,
    /// Campaign speech paragraph; contains [`LOCATION_PLACEHOLDER`].
    pub discurso: &'static str,
    /// Expected impact, independent of location.
    pub impacto: &'static str,
}

impl ConceptTemplates {
    #[must_use]
    pub fn propuesta_for(&self, location: &str) -> String {
        self.propuesta.replace(LOCATION_PLACEHOLDER, location)
    }

    #[must_use]
    pub fn discurso_for(&self, location: &str) -> String {
        self.discurso.replace(LOCATION_PLACEHOLDER, location)
    }
}

impl Concept {
    /// All concepts in canonical order.
    pub const ALL: [Concept; 10] = [
        Concept::Seguridad,
        Concept::Alimentacion,
        Concept::Infraestructura,
        Concept::GobernanzaTransparencia,
        Concept::IgualdadEquidad,
        Concept::PazReincorporacion,
        Concept::EconomiaEmpleo,
        Concept::MedioAmbiente,
        Concept::Educacion,
        Concept::Salud,
    ];

    /// Human-readable (Spanish) concept name, as shown in reports and charts.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Concept::Seguridad => "seguridad",
            Concept::Alimentacion => "alimentacion",
            Concept::Infraestructura => "infraestructura",
            Concept::GobernanzaTransparencia => "gobernanza y transparencia",
            Concept::IgualdadEquidad => "igualdad y equidad",
            Concept::PazReincorporacion => "paz y reincorporación",
            Concept::EconomiaEmpleo => "economía y empleo",
            Concept::MedioAmbiente => "medio ambiente y cambio climático",
            Concept::Educacion => "educación",
            Concept::Salud => "salud",
        }
    }

    /// Lowercase keywords, in query order.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Concept::Seguridad => &["seguridad", "delincuencia", "policía", "crimen", "violencia"],
            Concept::Alimentacion => &["alimentos", "comida", "hambre", "agricultura", "mercados"],
            Concept::Infraestructura => &["carreteras", "puentes", "transporte", "obras", "vías"],
            Concept::GobernanzaTransparencia => {
                &["transparencia", "corrupción", "gobierno", "gestión"]
            }
            Concept::IgualdadEquidad => &[
                "igualdad",
                "equidad",
                "inclusión",
                "discriminación",
                "diversidad",
            ],
            Concept::PazReincorporacion => &["paz", "conflicto", "reincorporación", "acuerdos"],
            Concept::EconomiaEmpleo => &["economía", "empleo", "trabajo", "desempleo", "industria"],
            Concept::MedioAmbiente => &["ambiente", "clima", "sostenibilidad", "ecología"],
            Concept::Educacion => &["educación", "escuelas", "universidad", "aprendizaje"],
            Concept::Salud => &["salud", "hospitales", "clínicas", "pandemia", "vacunas"],
        }
    }

    #[must_use]
    pub const fn templates(self) -> &'static ConceptTemplates {
        match self {
            Concept::Seguridad => &ConceptTemplates {
                propuesta: "Fortalecer la seguridad con más patrullajes y tecnología en {location}.",
                discurso: "¡{location} segura! Con más policías y cámaras, garantizaremos tranquilidad.",
                impacto: "Reducir homicidios 20% en 6 meses.",
            },
            Concept::Alimentacion => &ConceptTemplates {
                propuesta: "Crear mercados móviles para mejorar el acceso a alimentos en {location}.",
                discurso: "¡Alimentos frescos para todos en {location}! Mercados móviles en cada barrio.",
                impacto: "Aumentar acceso a alimentos frescos para 50,000 residentes.",
            },
            Concept::Infraestructura => &ConceptTemplates {
                propuesta: "Mejorar las vías y el transporte público en {location}.",
                discurso: "¡{location} conectada! Modernizaremos carreteras y transporte para todos.",
                impacto: "Reducir tiempos de viaje 30%.",
            },
            Concept::GobernanzaTransparencia => &ConceptTemplates {
                propuesta: "Implementar plataformas de transparencia en la gestión pública de {location}.",
                discurso: "¡{location} transparente! Publicaremos cada decisión para los ciudadanos.",
                impacto: "Aumentar confianza ciudadana 25%.",
            },
            Concept::IgualdadEquidad => &ConceptTemplates {
                propuesta: "Promover programas de inclusión social en {location}.",
                discurso: "¡{location} inclusiva! Todos tendrán oportunidades sin discriminación.",
                impacto: "Reducir incidentes de discriminación 15%.",
            },
            Concept::PazReincorporacion => &ConceptTemplates {
                propuesta: "Apoyar programas de reincorporación para víctimas en {location}.",
                discurso: "¡Paz en {location}! Construiremos un futuro con oportunidades para todos.",
                impacto: "Relocalizar 360 familias en 3 meses.",
            },
            Concept::EconomiaEmpleo => &ConceptTemplates {
                propuesta: "Impulsar el empleo con incentivos a pequeñas empresas en {location}.",
                discurso: "¡{location} próspera! Crearemos empleos apoyando a emprendedores.",
                impacto: "Crear 10,000 empleos en un año.",
            },
            Concept::MedioAmbiente => &ConceptTemplates {
                propuesta: "Proteger áreas verdes y promover energías renovables en {location}.",
                discurso: "¡{location} verde! Cuidaremos el ambiente con energía limpia.",
                impacto: "Aumentar cobertura verde 10%.",
            },
            Concept::Educacion => &ConceptTemplates {
                propuesta: "Mejorar el acceso a educación de calidad en {location}.",
                discurso: "¡Educación para todos en {location}! Escuelas modernas y accesibles.",
                impacto: "Reducir deserción escolar 15%.",
            },
            Concept::Salud => &ConceptTemplates {
                propuesta: "Fortalecer hospitales y acceso a salud en {location}.",
                discurso: "¡{location} saludable! Más hospitales y atención médica para todos.",
                impacto: "Reducir demoras en atención médica 40%.",
            },
        }
    }

    /// Keywords of this concept found in `text` (case-insensitive substring match).
    #[must_use]
    pub fn matching_keywords(self, text: &str) -> Vec<&'static str> {
        let lowered = text.to_lowercase();
        self.keywords()
            .iter()
            .copied()
            .filter(|keyword| lowered.contains(keyword))
            .collect()
    }
}

impl std::fmt::Display for Concept {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Destination of a classified post: one of the concepts or the fallback bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BucketKey {
    Concept(Concept),
    /// Posts captured by a concept's query whose text carries none of its keywords.
    Unmatched,
}

impl BucketKey {
    /// The ten concept buckets in canonical order, then the fallback bucket.
    pub const ALL: [BucketKey; 11] = [
        BucketKey::Concept(Concept::Seguridad),
        BucketKey::Concept(Concept::Alimentacion),
        BucketKey::Concept(Concept::Infraestructura),
        BucketKey::Concept(Concept::GobernanzaTransparencia),
        BucketKey::Concept(Concept::IgualdadEquidad),
        BucketKey::Concept(Concept::PazReincorporacion),
        BucketKey::Concept(Concept::EconomiaEmpleo),
        BucketKey::Concept(Concept::MedioAmbiente),
        BucketKey::Concept(Concept::Educacion),
        BucketKey::Concept(Concept::Salud),
        BucketKey::Unmatched,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            BucketKey::Concept(concept) => concept.name(),
            BucketKey::Unmatched => "Ninguno",
        }
    }

    #[must_use]
    pub const fn concept(self) -> Option<Concept> {
        match self {
            BucketKey::Concept(concept) => Some(concept),
            BucketKey::Unmatched => None,
        }
    }
}

impl Serialize for BucketKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
