#![allow(dead_code)]

/// Important articles and references that proved useful when designing this library
pub enum Bibliography {
    /// D. Bilitza, 2001: *International Reference Ionosphere 2000*.
    /// Radio Science 36, 261-275.
    /// [DOI](https://doi.org/10.1029/2000RS002432).
    IRI2000,
    /// D. Bilitza, B. Reinisch, 2008: *International Reference Ionosphere 2007:
    /// Improvements and new parameters*. Adv. Space Res. 42, 599-609.
    /// [DOI](https://doi.org/10.1016/j.asr.2007.07.048).
    IRI2007,
    /// D. Bilitza, N. Sheikh, R. Eyfrig, 1979: *A global model for the height
    /// of the F2-peak using M3000 values from the CCIR*. Telecomm. J. 46, 549-553.
    /// hmF2 formula.
    Bilitza79,
    /// B. Reinisch, X. Huang, 2000: *Deducing topside profiles and total
    /// electron content from bottomside ionograms*. Adv. Space Res. 25, 81-88.
    /// F1 layer shape parameter C1.
    ReinischHuang00,
    /// C. Scotto, M. Mosert de Gonzalez, S. Radicella, B. Zolesi, 1997:
    /// *On the prediction of F1 ledge occurrence and critical frequency*.
    /// Adv. Space Res. 20, 1773-1775.
    Scotto97,
    /// T. Gulyaeva, 1987: *Progress in ionospheric informatics based on
    /// electron density profile analysis of ionograms*. Adv. Space Res. 7, 39-48.
    /// Half density height ratio.
    Gulyaeva87,
    /// A. Danilov, A. Rodevich, N. Smirnova, 1995: *Problems with
    /// incorporating a new D-region model into the IRI*. Adv. Space Res. 15, 165-168.
    Danilov95,
    /// L. Brace, R. Theis, 1981: *Global empirical models of ionospheric
    /// electron temperature in the upper F-region and plasmasphere based on
    /// in situ measurements from the Atmosphere Explorer-C, ISIS-1 and ISIS-2
    /// satellites*. J. Atmos. Terr. Phys. 43, 1317-1343.
    BraceTheis81,
    /// V. Truhlik, L. Triskova, J. Smilauer, 2004: *Manifestation of solar
    /// activity in the global topside ion composition and electron
    /// temperature*. Adv. Space Res. 33, 844-849.
    Truhlik04,
    /// B. Scherliess, B. Fejer, 1999: *Radar and satellite global equatorial
    /// F region vertical drift model*. J. Geophys. Res. 104, 6829-6842.
    /// Reference pattern of the simplified drift approximation.
    ScherliessFejer99,
    /// E. Araujo-Pradere, T. Fuller-Rowell, M. Codrescu, 2002: *STORM:
    /// An empirical storm-time ionospheric correction model*. Radio Science 37.
    StormModel02,
    /// B. Nava, P. Coisson, S. Radicella, 2008: *A new version of the NeQuick
    /// ionosphere electron density model*. J. Atmos. Sol.-Terr. Phys. 70.
    NeQuick08,
}
