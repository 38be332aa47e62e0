//! User-facing reply texts for the registration and update flows.
//!
//! Kept in one place so the flow handlers stay about state, not wording.

use storage::ProfileRecord;

/// Command summary appended to several replies.
pub const COMMAND_LIST: &str = "Here are the functions you can use:\n/start - Register or view your information\n/update - Update your existing information\n/cancel - Cancel the current operation";

pub const WELCOME: &str = "Hi! My name is GetIn Bot. I am here to collect some of your information in relation to our newly developed educational platform GetIn that will simplify college application experience for everyone!. First of all, what is your first name?";

pub const ASK_LAST_NAME: &str = "Great! Now, what is your last name?";

pub const ASK_EMAIL: &str = "Nice to meet you! Can you give me your email address?";

pub const INVALID_EMAIL: &str = "It seems like you entered an invalid email address. Please enter a valid email address.";

pub const ASK_AGE: &str = "Thank you! Now, can you tell me how old you are?";

pub const INVALID_AGE: &str = "Please enter a valid age.";

pub const ASK_SCHOOL: &str = "Amazing! What school do you attend?";

pub const PREFERENCE_MENU: &str = "What are you looking for the most in GetIn?\n1. Use AI to strategize where to apply\n2. Help with SAT / ACT preparation\n3. Assistance with writing essays\n4. Affordable mentorship\nPlease type the number of your choice.";

pub const INVALID_PREFERENCE: &str = "It seems like you entered an invalid option. Please select from the following options:\n1. Use AI to strategize where to apply\n2. Help with SAT / ACT preparation\n3. Assistance with writing essays\n4. Affordable mentorship\nPlease type the number of your choice.";

pub fn preference_accepted(label: &str) -> String {
    format!("Thank you! We'll tailor our services based on your preference for: {label}. Lastly, can you tell me a little about yourself?")
}

pub const PROFILE_SAVED: &str = "Thank you for sharing about yourself, that would be all! Have a great day!";

pub const PROFILE_SAVE_FAILED: &str = "Sorry, there was a problem saving your information. Please try again later.";

pub const STORE_UNAVAILABLE: &str = "Sorry, there was a problem accessing your information. Please try again later.";

pub fn welcome_back(profile: &ProfileRecord) -> String {
    format!(
        "Welcome back! Here is your info:\nFirst name: {}\nLast name: {}\nAge: {}\nSchool: {}\nEmail: {}\nPreferences: {}\nBio: {}\nYou can update your information by sending /update",
        profile.first_name,
        profile.last_name,
        profile
            .age
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string()),
        profile.school.as_deref().unwrap_or("-"),
        profile.email,
        profile.preferences.as_deref().unwrap_or("-"),
        profile.bio,
    )
}

pub const UPDATE_MENU: &str = "What information would you like to update?\n1. First Name\n2. Last Name\n3. Age\n4. School\n5. Email\n6. Preferences\n7. Bio\nPlease choose: First Name, Last Name, Age, School, Email, Preferences, or Bio, or type /cancel to stop.";

pub const UPDATE_CHOICE_INVALID: &str = "Please choose a valid option: First name, Last name, Email, Age, School, Bio, Preferences, or type Done to finish.";

pub const UPDATE_DONE: &str = "Thank you for using our service. Goodbye!";

pub fn ask_new_value(field: &str) -> String {
    format!("Please enter your new {field}:")
}

pub fn preference_update_menu() -> String {
    format!("Please enter your new preferences from this list:\n{PREFERENCE_MENU}")
}

pub const UPDATE_INVALID_EMAIL: &str = "You have entered an invalid email. Please enter a valid email address.";

pub const NO_PROFILE: &str = "No user found. Please start the registration process with /start.";

pub const CANCELLED: &str = "Update process canceled. You can start again with /start or /update.";

pub const FIRST_NAME_UPDATED: &str = "Your first name has been updated. Would you like to update anything else? Type /update to continue or /cancel to finish.";

pub const LAST_NAME_UPDATED: &str = "Your last name has been updated. Would you like to update anything else? Type /update to continue or /cancel to finish.";

pub const EMAIL_UPDATED: &str = "Your email has been updated. Would you like to update anything else? If not, type Done.";

pub const AGE_UPDATED: &str = "Your age has been updated. Would you like to update anything else?";

pub const SCHOOL_UPDATED: &str = "Your school has been updated. Would you like to update anything else?";

pub fn preferences_updated(label: &str) -> String {
    format!("Your preferences have been updated to: {label}. Would you like to update anything else?")
}

pub const BIO_UPDATED: &str = "Your bio has been updated. Would you like to update anything else? If not, type Done.";

pub const FIRST_NAME_UPDATE_FAILED: &str = "Sorry, there was an error updating your first name. Please try again.";

pub const LAST_NAME_UPDATE_FAILED: &str = "Sorry, there was an error updating your last name. Please try again.";

pub const EMAIL_UPDATE_FAILED: &str = "Sorry, there was an error updating your email.";

pub const AGE_UPDATE_FAILED: &str = "Sorry, there was an error updating your age. Please try again.";

pub const SCHOOL_UPDATE_FAILED: &str = "Sorry, there was an error updating your school. Please try again.";

pub const PREFERENCES_UPDATE_FAILED: &str = "Sorry, there was an error updating your preferences. Please try again.";

pub const BIO_UPDATE_FAILED: &str = "Sorry, there was an error updating your bio.";
