/// Full club name for an NHL abbreviation, including legacy two-letter forms.
pub fn team_name(abbrev: &str) -> Option<&'static str> {
    let name = match abbrev.trim().to_uppercase().as_str() {
        "ANA" => "Anaheim Ducks",
        "ARI" => "Arizona Coyotes",
        "BOS" => "Boston Bruins",
        "BUF" => "Buffalo Sabres",
        "CAR" => "Carolina Hurricanes",
        "CBJ" => "Columbus Blue Jackets",
        "CGY" => "Calgary Flames",
        "CHI" => "Chicago Blackhawks",
        "COL" => "Colorado Avalanche",
        "DAL" => "Dallas Stars",
        "DET" => "Detroit Red Wings",
        "EDM" => "Edmonton Oilers",
        "FLA" => "Florida Panthers",
        "LA" | "LAK" => "Los Angeles Kings",
        "MIN" => "Minnesota Wild",
        "MTL" => "Montreal Canadiens",
        "NJ" | "NJD" => "New Jersey Devils",
        "NSH" => "Nashville Predators",
        "NYI" => "New York Islanders",
        "NYR" => "New York Rangers",
        "OTT" => "Ottawa Senators",
        "PHI" => "Philadelphia Flyers",
        "PIT" => "Pittsburgh Penguins",
        "SJ" | "SJS" => "San Jose Sharks",
        "SEA" => "Seattle Kraken",
        "STL" => "St. Louis Blues",
        "TB" | "TBL" => "Tampa Bay Lightning",
        "TOR" => "Toronto Maple Leafs",
        "UTA" => "Utah Hockey Club",
        "VAN" => "Vancouver Canucks",
        "VGK" => "Vegas Golden Knights",
        "WPG" => "Winnipeg Jets",
        "WSH" => "Washington Capitals",
        _ => return None,
    };
    Some(name)
}
