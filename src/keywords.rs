//! Canonical ingredient keyword table.
//!
//! Maps a lowercase keyword, as it appears in the cookbook's ingredient
//! lists, to the key of a food record in `data/foods`. Each ingredient has
//! exactly one entry here; the matcher resolves overlaps (`cherry tomato`
//! vs `tomato`) by trying longer keywords first, so table order does not
//! matter.

/// `(keyword, food key)` pairs.
pub static FOOD_KEYWORDS: &[(&str, &str)] = &[
    // Greens
    ("kale", "kale"),
    ("cavolo nero", "cavolo-nero"),
    ("spinach", "spinach"),
    ("rocket", "greens-low-oxalate"),
    ("arugula", "greens-low-oxalate"),
    ("collard", "collard-greens"),
    ("mustard green", "mustard-greens"),
    ("bok choy", "bok-choy"),
    ("dark leafy greens", "kale"),
    ("lettuce", "lettuce"),
    // Cruciferous
    ("broccoli", "broccoli"),
    ("cauliflower", "cauliflower"),
    ("cabbage", "cabbage"),
    ("napa cabbage", "napa-cabbage"),
    ("brussels sprout", "brussels-sprouts"),
    // Other vegetables
    ("asparagus", "asparagus"),
    ("sweet potato", "sweet-potatoes"),
    ("potato", "potatoes-white"),
    ("carrot", "carrots"),
    ("tomato", "tomatoes-all-types"),
    ("cherry tomato", "cherry-tomatoes"),
    ("bell pepper", "bell-peppers"),
    ("red pepper", "bell-peppers"),
    ("courgette", "zucchini-courgette"),
    ("zucchini", "zucchini-courgette"),
    ("pumpkin", "pumpkin"),
    ("pumpkin puree", "pumpkin-puree"),
    ("cucumber", "cucumber"),
    ("celery", "celery"),
    ("bean sprout", "bean-sprouts"),
    ("parsnip", "parsnips"),
    ("beetroot", "beets-beetroot"),
    ("beet", "beets-beetroot"),
    ("artichoke", "artichokes"),
    ("spaghetti squash", "spaghetti-squash"),
    ("butternut squash", "butternut-squash"),
    ("kabocha squash", "kabocha-squash"),
    ("summer squash", "summer-squash"),
    ("yellow squash", "summer-squash"),
    ("green beans", "green-beans"),
    ("snow peas", "mange-tout-snow-peas"),
    ("mange tout", "mange-tout-snow-peas"),
    ("mushroom", "mushrooms-white"),
    ("portobello", "portobello-mushrooms"),
    ("shiitake", "mushrooms-shiitake"),
    ("onion", "onions"),
    ("garlic", "garlic"),
    ("avocado", "avocado"),
    ("green chilli", "green-chilli"),
    // Beans and legumes
    ("beans", "beans-legumes"),
    ("cannellini", "white-beans-cannellini"),
    ("white beans", "white-beans-cannellini"),
    ("chickpea", "chickpeas"),
    ("black beans", "black-beans"),
    ("kidney beans", "red-beans-kidney"),
    ("red beans", "red-beans-kidney"),
    ("lima beans", "lima-beans"),
    ("pinto beans", "pinto-beans"),
    ("navy beans", "navy-beans"),
    ("adzuki beans", "adzuki-beans"),
    ("mung beans", "mung-beans"),
    ("moong dal", "moong-dal-split-mung-beans"),
    ("black-eyed peas", "black-eyed-peas"),
    ("black-eyed beans", "black-eyed-peas"),
    ("lentils", "lentils-brown-puy"),
    ("puy lentils", "lentils-brown-puy"),
    ("black lentils", "lentils-black-beluga"),
    ("beluga lentils", "lentils-black-beluga"),
    ("edamame", "edamame"),
    ("peas", "peas"),
    ("tempeh", "tempeh"),
    ("miso", "miso"),
    // Whole grains
    ("quinoa", "quinoa"),
    ("oats", "oat-groats-whole-intact-oats"),
    ("oat groats", "oat-groats-whole-intact-oats"),
    ("barley", "pot-barley-groats"),
    ("rye berries", "rye-berries-whole"),
    ("teff", "teff"),
    // Nuts and seeds
    ("flaxseed", "flaxseeds-ground"),
    ("chia seed", "chia-seeds"),
    ("peanut", "peanuts"),
    ("walnut", "walnuts"),
    ("almond", "almonds"),
    ("cashew", "cashews"),
    ("pistachio", "pistachios"),
    ("brazil nut", "brazil-nuts"),
    ("pumpkin seed", "pumpkin-seeds"),
    ("nigella seed", "nigella-seeds-black-cumin"),
    ("black cumin", "nigella-seeds-black-cumin"),
    // Fruit
    ("lemon", "lemon"),
    ("cranberries", "cranberries-dried"),
    ("dark cherries", "cherries-dark"),
    ("plum", "plums"),
    ("nectarine", "nectarines"),
    ("medjool date", "dates-soft-medjool"),
    // Herbs and spices
    ("basil", "fresh-herbs"),
    ("parsley", "fresh-herbs"),
    ("coriander", "fresh-herbs"),
    ("ground coriander", "coriander-ground"),
    ("rosemary", "fresh-herbs"),
    ("sage", "fresh-herbs"),
    ("thyme", "fresh-herbs"),
    ("turmeric", "turmeric"),
    ("ginger", "ginger"),
    ("black pepper", "black-pepper"),
    ("cayenne", "cayenne-pepper"),
    ("red pepper flakes", "crushed-red-pepper-flakes"),
    ("cumin", "cumin"),
    ("cinnamon", "cinnamon"),
    ("oregano", "oregano-dried"),
    ("garlic powder", "garlic-powder"),
    ("onion powder", "onion-powder"),
    ("paprika", "smoked-paprika"),
    ("berbere", "berbere-spice-blend"),
    // Condiments and pantry
    ("vinegar", "vinegar-all-types"),
    ("nutritional yeast", "nutritional-yeast"),
    ("cocoa powder", "cocoa-powder-unsweetened"),
    ("cacao nibs", "cacao-nibs"),
    ("date syrup", "date-syrup"),
    ("vanilla extract", "vanilla-extract-pure"),
    // Beverages
    ("hibiscus", "hibiscus-tea"),
    ("green tea", "green-tea"),
];
