use serde::Deserialize;
use std::fmt;

/// Declares a closed enumeration of TOPAS string tokens.
///
/// Each variant maps to exactly one token; deserialization accepts only the
/// listed tokens (case-sensitive) and `Display` renders the token back out
/// for script emission.
macro_rules! tokens {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $token:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $token)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $token),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

tokens! {
    /// Units accepted for beam energies and electromagnetic range bounds.
    EnergyUnit {
        Ev => "eV",
        Mev => "MeV",
    }
}

tokens! {
    /// Units accepted for beam position cutoffs and spreads.
    LengthUnit {
        Cm => "cm",
        Mm => "mm",
    }
}

tokens! {
    /// Units accepted for beam angular cutoffs and spreads.
    AngleUnit {
        Deg => "deg",
        Rad => "rad",
    }
}

tokens! {
    ParticleSourceType {
        Beam => "Beam",
        Isotropic => "Isotropic",
        Emittance => "Emittance",
        PhaseSpace => "PhaseSpace",
    }
}

tokens! {
    BeamParticle {
        Proton => "proton",
    }
}

tokens! {
    BeamAngularDistribution {
        Gaussian => "Gaussian",
        Flat => "Flat",
    }
}

tokens! {
    BeamPositionCutoffShape {
        Point => "Point",
        Ellipse => "Ellipse",
        Rectangle => "Rectangle",
        Isotropic => "Isotropic",
    }
}

tokens! {
    BeamPositionDistribution {
        Gaussian => "Gaussian",
        Flat => "Flat",
    }
}

tokens! {
    /// Geant4 physics modules selectable in a modular physics list.
    PhysicsListModule {
        G4hChargeExchange => "g4h-chargeexchange",
        G4Decay => "g4decay",
        G4EmDna => "g4em-dna",
        G4EmDnaOpt1 => "g4em-dna_opt1",
        G4EmDnaOpt2 => "g4em-dna_opt2",
        G4EmDnaOpt3 => "g4em-dna_opt3",
        G4EmDnaOpt4 => "g4em-dna_opt4",
        G4EmDnaOpt5 => "g4em-dna_opt5",
        G4EmDnaOpt6 => "g4em-dna_opt6",
        G4EmDnaOpt7 => "g4em-dna_opt7",
        G4EmDnaOpt8 => "g4em-dna_opt8",
        G4EmDnaStationary => "g4em-dna-stationary",
        G4EmDnaStationaryOpt2 => "g4em-dna-stationary_opt2",
        G4EmDnaStationaryOpt4 => "g4em-dna-stationary_opt4",
        G4EmDnaStationaryOpt6 => "g4em-dna-stationary_opt6",
        G4EmDnaChemistry => "g4em-dna-chemistry",
        G4EmStandardGs => "g4em-standard_GS",
        G4EmStandardSs => "g4em-standard_SS",
        G4EmStandardWvi => "g4em-standard_WVI",
        G4hPhyQgspBicAllHp => "g4h-phy_QGSP_BIC_AllHP",
        G4EmExtra => "g4em-extra",
        G4EmLivermore => "g4em-livermore",
        G4EmPolarized => "g4em-polarized",
        G4EmLowep => "g4em-lowep",
        G4EmPenelope => "g4em-penelope",
        G4EmStandardOpt0 => "g4em-standard_opt0",
        G4EmStandardOpt1 => "g4em-standard_opt1",
        G4EmStandardOpt2 => "g4em-standard_opt2",
        G4EmStandardOpt3 => "g4em-standard_opt3",
        G4EmStandardOpt4 => "g4em-standard_opt4",
        G4hElasticD => "g4h-elastic_D",
        G4hElastic => "g4h-elastic",
        G4hElasticHp => "g4h-elastic_HP",
        G4hElasticLend => "g4h-elastic_LEND",
        G4hElasticXs => "g4h-elastic_XS",
        G4hElasticH => "g4h-elastic_H",
        G4hInelasticQbbc => "g4h-inelastic_QBBC",
        G4hPhyFtfpBert => "g4h-phy_FTFP_BERT",
        G4hPhyFtfpBertHp => "g4h-phy_FTFP_BERT_HP",
        G4hPhyFtfpBertTrv => "g4h-phy_FTFP_BERT_TRV",
        G4hPhyFtfBic => "g4h-phy_FTF_BIC",
        G4hPhyQgspBert => "g4h-phy_QGSP_BERT",
        G4hPhyQgspBertHp => "g4h-phy_QGSP_BERT_HP",
        G4hPhyQgspBic => "g4h-phy_QGSP_BIC",
        G4hPhyQgspBicHp => "g4h-phy_QGSP_BIC_HP",
        G4hPhyQgspFtfpBert => "g4h-phy_QGSP_FTFP_BERT",
        G4hPhyQgsBic => "g4h-phy_QGS_BIC",
        G4hPhyShielding => "g4h-phy_Shielding",
        G4IonBinaryCascade => "g4ion-binarycascade",
        G4IonInclxx => "g4ion-inclxx",
        G4Ion => "g4ion",
        G4IonQmd => "g4ion-QMD",
        G4nTrackingCut => "g4n-trackingcut",
        G4Optical => "g4optical",
        G4RadioactiveDecay => "g4radioactivedecay",
        G4Stopping => "g4stopping",
    }
}

tokens! {
    PhysicsListType {
        Geant4Modular => "Geant4_Modular",
    }
}

tokens! {
    ScorerQuantity {
        DoseToMedium => "DoseToMedium",
        DoseToWater => "DoseToWater",
        DoseToMaterial => "DoseToMaterial",
        TrackLengthEstimator => "TrackLengthEstimator",
        AmbientDoseEquivalent => "AmbientDoseEquivalent",
        EnergyDeposit => "EnergyDeposit",
        Fluence => "Fluence",
        EnergyFluence => "EnergyFluence",
        StepCount => "StepCount",
        OpticalPhotonCount => "OpticalPhotonCount",
        OriginCount => "OriginCount",
        Charge => "Charge",
        EffectiveCharge => "EffectiveCharge",
        ProtonLet => "ProtonLET",
    }
}

tokens! {
    /// Particle species usable in scorer filters. PDG codes are not supported.
    ParticleType {
        Proton => "proton",
        Neutron => "neutron",
        EPlus => "e+",
        EMinus => "e-",
        Gamma => "gamma",
        He3 => "He3",
        Alpha => "alpha",
        Deuteron => "deuteron",
        Triton => "triton",
        OpticalPhoton => "opticalphoton",
        Geantino => "geantino",
        ChargedGeantino => "chargedgeantino",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder<T> {
        value: T,
    }

    fn parse<T: for<'de> Deserialize<'de>>(token: &str) -> Result<T, toml::de::Error> {
        toml::from_str::<Holder<T>>(&format!("value = \"{}\"", token)).map(|h| h.value)
    }

    #[test]
    fn known_tokens_deserialize_exactly() {
        assert_eq!(parse::<EnergyUnit>("MeV").unwrap(), EnergyUnit::Mev);
        assert_eq!(
            parse::<PhysicsListModule>("g4em-standard_opt4").unwrap(),
            PhysicsListModule::G4EmStandardOpt4
        );
        assert_eq!(parse::<ParticleType>("e+").unwrap(), ParticleType::EPlus);
        assert_eq!(
            parse::<ScorerQuantity>("ProtonLET").unwrap(),
            ScorerQuantity::ProtonLet
        );
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert!(parse::<EnergyUnit>("keV").is_err());
        assert!(parse::<PhysicsListModule>("g4em-standard_opt9").is_err());
        assert!(parse::<BeamParticle>("electron").is_err());
    }

    #[test]
    fn token_case_is_significant() {
        assert!(parse::<EnergyUnit>("mev").is_err());
        assert!(parse::<ParticleSourceType>("beam").is_err());
    }

    #[test]
    fn display_round_trips_the_token() {
        assert_eq!(PhysicsListModule::G4hPhyQgspBicAllHp.to_string(), "g4h-phy_QGSP_BIC_AllHP");
        assert_eq!(ParticleType::EMinus.to_string(), "e-");
        assert_eq!(PhysicsListType::Geant4Modular.to_string(), "Geant4_Modular");
    }
}
