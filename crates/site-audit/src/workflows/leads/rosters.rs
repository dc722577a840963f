use super::domain::CompanySize;
use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Company {
    pub name: &'static str,
    pub domain: &'static str,
    pub size: CompanySize,
}

const fn company(name: &'static str, domain: &'static str, size: CompanySize) -> Company {
    Company { name, domain, size }
}

use CompanySize::{Enterprise, Large, Medium, Small, Startup};

const TECHNOLOGY: &[Company] = &[
    company("TechFlow Solutions", "techflow.com", Medium),
    company("DataSync Corp", "datasync.io", Large),
    company("CloudBridge Systems", "cloudbridge.net", Small),
    company("AI Innovations Inc", "aiinnovations.com", Startup),
    company("DevOps Masters", "devopsmaster.org", Medium),
    company("CyberSecure Pro", "cybersecure.biz", Large),
    company("MobileFirst Labs", "mobilefirst.co", Startup),
    company("BlockChain Dynamics", "blockchain-dyn.com", Medium),
];

const ECOMMERCE: &[Company] = &[
    company("ShopSmart Online", "shopsmart.store", Large),
    company("EcoGoods Market", "ecogoods.shop", Medium),
    company("Fashion Forward", "fashionforward.com", Large),
    company("Home Essentials Plus", "homeessentials.net", Medium),
    company("Tech Gadgets Hub", "techgadgets.co", Small),
    company("Artisan Crafts Co", "artisancrafts.org", Small),
];

const HEALTHCARE: &[Company] = &[
    company("MedTech Solutions", "medtech-sol.com", Large),
    company("HealthFirst Clinic", "healthfirst.med", Medium),
    company("WellCare Systems", "wellcare.health", Large),
    company("Digital Health Pro", "digitalhealth.io", Startup),
    company("Pharma Innovations", "pharmainno.com", Enterprise),
];

const FINANCE: &[Company] = &[
    company("FinTech Dynamics", "fintech-dyn.com", Large),
    company("Investment Partners", "investpartners.biz", Large),
    company("CryptoSecure Bank", "cryptosecure.bank", Medium),
    company("Wealth Management Pro", "wealthmgmt.co", Medium),
    company("PayFlow Solutions", "payflow.net", Startup),
];

const EDUCATION: &[Company] = &[
    company("EduTech Academy", "edutech.edu", Medium),
    company("Learning Dynamics", "learndynamics.org", Large),
    company("SkillBuilder Pro", "skillbuilder.com", Startup),
    company("University Connect", "uniconnect.edu", Large),
];

const REAL_ESTATE: &[Company] = &[
    company("PropTech Solutions", "proptech.realty", Medium),
    company("Urban Development Co", "urbandev.com", Large),
    company("Smart Homes Inc", "smarthomes.co", Medium),
    company("Commercial Properties", "commercialprop.biz", Large),
];

/// Roster used for any industry without its own list.
pub const OTHER: &[Company] = &[
    company("Global Consulting Group", "globalconsult.com", Large),
    company("Innovation Partners", "innovpartners.co", Medium),
    company("Strategic Solutions", "strategicsol.biz", Medium),
    company("Business Dynamics", "bizdynamics.org", Small),
];

pub const DEFAULT_JOB_TITLES: &[&str] = &[
    "CEO",
    "CTO",
    "CMO",
    "VP of Sales",
    "VP of Marketing",
    "Director of Operations",
    "Head of Business Development",
    "Sales Manager",
    "Marketing Manager",
    "Product Manager",
    "Business Development Manager",
    "Account Manager",
    "Digital Marketing Director",
    "Growth Manager",
];

pub const FIRST_NAMES: &[&str] = &[
    "Alex", "Sarah", "Michael", "Emma", "David", "Lisa", "John", "Jennifer", "Robert", "Jessica",
    "William", "Ashley", "James", "Amanda", "Christopher", "Melissa", "Daniel", "Michelle",
    "Matthew", "Kimberly", "Anthony", "Amy", "Mark", "Angela", "Donald", "Helen", "Steven",
    "Brenda", "Andrew", "Nicole",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark",
];

pub const CITIES: &[&str] = &[
    "New York, NY",
    "Los Angeles, CA",
    "Chicago, IL",
    "Houston, TX",
    "Phoenix, AZ",
    "Philadelphia, PA",
    "San Antonio, TX",
    "San Diego, CA",
    "Dallas, TX",
    "San Jose, CA",
    "Austin, TX",
    "Jacksonville, FL",
    "Fort Worth, TX",
    "Columbus, OH",
    "Charlotte, NC",
    "San Francisco, CA",
    "Indianapolis, IN",
    "Seattle, WA",
    "Denver, CO",
    "Boston, MA",
];

static ROSTERS: OnceLock<HashMap<&'static str, &'static [Company]>> = OnceLock::new();

fn rosters() -> &'static HashMap<&'static str, &'static [Company]> {
    ROSTERS.get_or_init(|| {
        HashMap::from([
            ("Technology", TECHNOLOGY),
            ("E-commerce", ECOMMERCE),
            ("Healthcare", HEALTHCARE),
            ("Finance", FINANCE),
            ("Education", EDUCATION),
            ("Real Estate", REAL_ESTATE),
            ("Other", OTHER),
        ])
    })
}

/// Companies for `industry`, or the generic roster when the industry has none.
pub fn companies_for_industry(industry: &str) -> &'static [Company] {
    rosters().get(industry).copied().unwrap_or(OTHER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_industries_use_generic_roster() {
        assert_eq!(companies_for_industry("Food & Beverage"), OTHER);
        assert_eq!(companies_for_industry("technology"), OTHER);
        assert_eq!(companies_for_industry("Finance").len(), 5);
    }

    #[test]
    fn rosters_are_populated() {
        assert_eq!(FIRST_NAMES.len(), 30);
        assert_eq!(LAST_NAMES.len(), 27);
        assert_eq!(CITIES.len(), 20);
        assert_eq!(DEFAULT_JOB_TITLES.len(), 14);
        assert!(rosters().values().all(|companies| !companies.is_empty()));
    }
}
